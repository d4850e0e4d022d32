//! Per-node-type callback table

use std::fmt;

use crate::{DomStack, NodeType};

/// Stack callback
///
/// As an entry callback it runs right after the node's frame was pushed
/// (the frame is already the stack top) and returns the node to descend
/// into: the same node, a substitute, or `None` to reject the node.
///
/// As an exit callback it runs while the frame is still the top, just
/// before it is popped. The node argument is the frame being unwound to,
/// which differs from the popped frame's node during
/// [`DomStack::unwind_to`]. The return value is ignored.
///
/// See [`DomStack`] for how the payload argument relates to the frame's.
pub type Callback<N, C, P> = fn(&mut DomStack<N, C, P>, N, &mut P) -> Option<N>;

/// Callbacks indexed by node type
///
/// Owned by each stack, so independent stacks can use different tables.
pub struct Callbacks<N, C, P = ()> {
    enter: [Option<Callback<N, C, P>>; NodeType::COUNT],
    exit: [Option<Callback<N, C, P>>; NodeType::COUNT],
}

impl<N, C, P> Callbacks<N, C, P> {
    /// Empty table
    pub fn new() -> Self {
        Self {
            enter: [None; NodeType::COUNT],
            exit: [None; NodeType::COUNT],
        }
    }

    /// Register an entry callback
    ///
    /// Unless [`on_exit`](Self::on_exit) registers something else, the
    /// same callback also runs when the node's frame is popped.
    pub fn on_enter(mut self, node_type: NodeType, callback: Callback<N, C, P>) -> Self {
        self.enter[node_type.index()] = Some(callback);
        self
    }

    /// Register a dedicated exit callback
    pub fn on_exit(mut self, node_type: NodeType, callback: Callback<N, C, P>) -> Self {
        self.exit[node_type.index()] = Some(callback);
        self
    }

    /// Entry callback for a node type
    #[inline]
    pub fn enter(&self, node_type: NodeType) -> Option<Callback<N, C, P>> {
        self.enter[node_type.index()]
    }

    /// Callback recorded as a frame's exit callback when it is pushed
    #[inline]
    pub fn exit(&self, node_type: NodeType) -> Option<Callback<N, C, P>> {
        self.exit[node_type.index()].or(self.enter[node_type.index()])
    }
}

impl<N, C, P> Clone for Callbacks<N, C, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, C, P> Copy for Callbacks<N, C, P> {}

impl<N, C, P> Default for Callbacks<N, C, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C, P> fmt::Debug for Callbacks<N, C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered = |table: &[Option<Callback<N, C, P>>; NodeType::COUNT]| {
            NodeType::ALL
                .into_iter()
                .filter(|node_type| table[node_type.index()].is_some())
                .collect::<Vec<_>>()
        };
        f.debug_struct("Callbacks")
            .field("enter", &registered(&self.enter))
            .field("exit", &registered(&self.exit))
            .finish()
    }
}
