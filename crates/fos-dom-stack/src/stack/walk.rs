//! Walk driver - depth-first traversal without recursion
//!
//! All traversal state lives in the frames: which child list of the node
//! is being walked and the next index in it. Auxiliary storage is one frame
//! per level of depth.

use crate::{DomNode, DomStack, PushError};

impl<N: DomNode, C, P: Default + Clone> DomStack<N, C, P> {
    /// Walk the subtree rooted at `root`
    ///
    /// Every node is pushed (entry callback) and later popped (exit
    /// callback). A node's child lists are walked in the order given by
    /// [`NodeType::child_lists`](crate::NodeType::child_lists).
    ///
    /// When a child cannot be pushed, its parent is popped right away and
    /// the parent's remaining children are skipped. Frames that were open
    /// before the walk are left alone. Fails only if `root` itself cannot
    /// be pushed.
    pub fn walk(&mut self, root: N) -> Result<(), PushError<N>> {
        let base = self.depth();
        tracing::debug!(depth = base, root = root.node_name(), "Walking DOM subtree");

        self.push(root)?;

        while self.depth() > base {
            if let Some(child) = self.next_child() {
                match self.push(child) {
                    Ok(_) => continue,
                    Err(err) => tracing::trace!(depth = self.depth(), %err, "child not pushed"),
                }
            }
            self.pop();
        }

        tracing::debug!(depth = self.depth(), "DOM walk finished");
        Ok(())
    }

    /// Take the next child of the top frame's node
    ///
    /// Moves on to the node's next child list once the active one is used
    /// up, restarting the index at 0.
    fn next_child(&mut self) -> Option<N> {
        let frame = self.top_mut()?;
        let lists = frame.node.node_type().child_lists();

        let mut list = match frame.list {
            Some(list) => list,
            None if lists.is_empty() => return None,
            None => {
                frame.list = Some(0);
                frame.index = 0;
                0
            }
        };

        loop {
            let child_list = *lists.get(list)?;
            if frame.node.has_child_at(child_list, frame.index) {
                let child = frame.node.child_at(child_list, frame.index)?;
                frame.index += 1;
                return Some(child);
            }

            if list + 1 >= lists.len() {
                return None;
            }
            list += 1;
            frame.list = Some(list);
            frame.index = 0;
        }
    }
}
