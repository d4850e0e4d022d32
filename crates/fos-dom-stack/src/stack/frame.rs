//! Visit frames and their backing store

use std::collections::TryReserveError;
use std::fmt;

use crate::{Callback, ChildList, DomNode};

/// Frame store capacity is always grown to a multiple of this
pub const FRAME_GRANULARITY: usize = 8;

/// State of one tree depth during a traversal
pub struct Frame<N, C, P> {
    pub(crate) node: N,
    /// Position of the active list in the node type's child lists
    pub(crate) list: Option<usize>,
    /// Next index to consume from the active list
    pub(crate) index: usize,
    pub(crate) exit: Option<Callback<N, C, P>>,
    pub(crate) payload: P,
    /// Set whenever the payload is borrowed mutably through the frame
    pub(crate) payload_touched: bool,
}

impl<N, C, P: Default> Frame<N, C, P> {
    pub(crate) fn new(node: N, exit: Option<Callback<N, C, P>>) -> Self {
        Self {
            node,
            list: None,
            index: 0,
            exit,
            payload: P::default(),
            payload_touched: false,
        }
    }
}

impl<N, C, P> Frame<N, C, P> {
    /// Node visited at this depth
    #[inline]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Next index to consume from the active child list
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        self.payload_touched = true;
        &mut self.payload
    }

    pub fn has_exit_callback(&self) -> bool {
        self.exit.is_some()
    }
}

impl<N: DomNode, C, P> Frame<N, C, P> {
    /// Child list currently being walked, unset until the walk reaches it
    pub fn active_list(&self) -> Option<ChildList> {
        let list = self.list?;
        self.node.node_type().child_lists().get(list).copied()
    }
}

impl<N: fmt::Debug, C, P: fmt::Debug> fmt::Debug for Frame<N, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("node", &self.node)
            .field("list", &self.list)
            .field("index", &self.index)
            .field("exit", &self.exit.is_some())
            .field("payload", &self.payload)
            .finish()
    }
}

/// Depth-indexed frame storage
///
/// Growth goes through `try_reserve_exact` so allocation failure surfaces as
/// an error instead of aborting.
#[derive(Debug)]
pub(crate) struct FrameStore<T> {
    frames: Vec<T>,
    /// Frame count beyond which growth fails
    #[cfg(test)]
    limit: Option<usize>,
}

impl<T> FrameStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            frames: Vec::new(),
            #[cfg(test)]
            limit: None,
        }
    }

    /// Make every reservation past `limit` frames fail
    #[cfg(test)]
    pub(crate) fn limit_growth(&mut self, limit: usize) {
        self.limit = Some(limit);
    }

    /// Make room for `required` frames
    ///
    /// Capacity is rounded up to the next multiple of [`FRAME_GRANULARITY`].
    /// Stored frames are preserved.
    pub(crate) fn reserve_for(&mut self, required: usize) -> Result<(), TryReserveError> {
        #[cfg(test)]
        if self.limit.is_some_and(|limit| required > limit) {
            return Vec::<u8>::new().try_reserve(usize::MAX);
        }

        if self.frames.capacity() >= required {
            return Ok(());
        }
        let target = required
            .checked_next_multiple_of(FRAME_GRANULARITY)
            .unwrap_or(required);
        self.frames.try_reserve_exact(target - self.frames.len())
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    /// Store a frame; capacity must have been reserved
    pub(crate) fn push(&mut self, frame: T) {
        debug_assert!(self.frames.len() < self.frames.capacity());
        self.frames.push(frame);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.frames.get(index)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.frames.get_mut(index)
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.frames
    }
}
