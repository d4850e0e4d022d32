//! Ancestor search and targeted unwind
//!
//! Closing a tag in lenient markup closes every element opened after it.
//! `unwind_to` does that in one call; each exit callback on the way sees the
//! ancestor being closed, not the frame it belongs to.

use crate::{DomNode, DomStack, NodeType};

impl<N: DomNode, C, P: Default + Clone> DomStack<N, C, P> {
    /// Position of the nearest frame whose node has this type and name
    ///
    /// Scans from the top down. Names compare exactly.
    pub fn search(&self, node_type: NodeType, name: &str) -> Option<usize> {
        self.frames()
            .rposition(|frame| frame.node.node_type() == node_type && frame.node.node_name() == name)
    }

    /// Pop every frame down to and including the nearest match
    ///
    /// Returns the number of frames popped. Without a match nothing is
    /// popped.
    pub fn unwind_to(&mut self, node_type: NodeType, name: &str) -> usize {
        let Some(target) = self.search(node_type, name) else {
            tracing::trace!(?node_type, name, "no open frame to unwind to");
            return 0;
        };

        tracing::trace!(?node_type, name, target_depth = target, depth = self.depth(), "unwind");

        let mut popped = 0;
        while self.depth() > target {
            popped += 1;
            if self.pop_frame(target) {
                break;
            }
        }
        popped
    }
}
