//! DOM Stack - frames from the walk root to the current node
//!
//! Pushing a node opens a frame and runs the entry callback registered for
//! its type; popping runs the frame's exit callback and drops the frame.
//! Callbacks get the stack itself and may push and pop on it.

mod frame;
mod search;
mod walk;

pub use frame::{Frame, FRAME_GRANULARITY};

use frame::FrameStore;

use crate::{Callbacks, DomNode, PushError, StackConfig};

/// Traversal stack
///
/// `C` is caller context shared by all callbacks, `P` is per-frame payload
/// reset to `P::default()` whenever its frame goes away.
///
/// Callbacks receive the payload as an argument and can also reach it
/// through the stack accessors. The entry callback's argument starts out as
/// `P::default()` and is stored into the frame when the node is accepted,
/// unless the callback wrote the frame's payload through the stack, in
/// which case that write is kept. The exit callback's argument is a copy of
/// the frame's payload, which stays readable through the stack until the
/// frame is dropped.
pub struct DomStack<N, C, P = ()> {
    frames: FrameStore<Frame<N, C, P>>,
    callbacks: Callbacks<N, C, P>,
    config: StackConfig,
    context: C,
}

impl<N: DomNode, C, P: Default + Clone> DomStack<N, C, P> {
    /// Create a stack with the default configuration
    pub fn new(context: C, callbacks: Callbacks<N, C, P>) -> Self {
        Self::with_config(context, callbacks, StackConfig::default())
    }

    pub fn with_config(context: C, callbacks: Callbacks<N, C, P>, config: StackConfig) -> Self {
        Self {
            frames: FrameStore::new(),
            callbacks,
            config,
            context,
        }
    }

    /// Push a node, making it the stack top
    ///
    /// Returns the node accepted by the entry callback, which may be a
    /// substitute for `node`; the frame then refers to the substitute.
    ///
    /// On `Rejected` and `DepthExceeded` the node is handed back. On
    /// `OutOfMemory` it has been dropped.
    pub fn push(&mut self, node: N) -> Result<N, PushError<N>> {
        let depth = self.depth();
        let max_depth = self.config.max_depth;

        if depth > max_depth {
            tracing::warn!(depth, max_depth, "DOM stack depth limit exceeded");
            return Err(PushError::DepthExceeded { node, max_depth });
        }

        if let Err(err) = self.frames.reserve_for(depth + 1) {
            tracing::warn!(depth, error = %err, "Failed to grow DOM stack");
            drop(node);
            return Err(PushError::OutOfMemory);
        }

        let node_type = node.node_type();
        self.frames
            .push(Frame::new(node.clone(), self.callbacks.exit(node_type)));

        tracing::trace!(depth = depth + 1, ?node_type, name = node.node_name(), "push");

        let Some(enter) = self.callbacks.enter(node_type) else {
            return Ok(node);
        };

        let mut payload = P::default();
        match enter(self, node.clone(), &mut payload) {
            Some(accepted) => {
                // The callback may have popped this frame itself
                if let Some(frame) = self.frames.get_mut(depth) {
                    frame.node = accepted.clone();
                    if !frame.payload_touched {
                        frame.payload = payload;
                    }
                }
                Ok(accepted)
            }
            None => {
                if self.depth() > depth + 1 {
                    tracing::warn!(
                        depth,
                        open = self.depth() - depth - 1,
                        "Rejecting entry callback left frames open, discarding them"
                    );
                }
                self.frames.truncate(depth);
                tracing::trace!(depth, ?node_type, "rejected");
                Err(PushError::Rejected(node))
            }
        }
    }

    /// Pop the top frame
    ///
    /// Its exit callback gets the frame's own node. Returns false if the
    /// stack was empty.
    pub fn pop(&mut self) -> bool {
        match self.depth().checked_sub(1) {
            Some(top) => self.pop_frame(top),
            None => false,
        }
    }

    /// Pop frames until `depth` is reached
    pub fn pop_to_depth(&mut self, depth: usize) {
        while self.depth() > depth {
            self.pop();
        }
    }

    /// Pop the top frame on the way to the frame at `target`
    ///
    /// The exit callback receives the target frame's node. Returns whether
    /// the popped frame was the target.
    pub(crate) fn pop_frame(&mut self, target: usize) -> bool {
        let Some(top) = self.depth().checked_sub(1) else {
            return false;
        };
        debug_assert!(target <= top);

        let Some(context_node) = self.frames.get(target).map(|frame| frame.node.clone()) else {
            return false;
        };

        let Some(frame) = self.frames.get(top) else {
            return false;
        };
        if let Some(exit) = frame.exit {
            let mut payload = frame.payload.clone();
            exit(self, context_node, &mut payload);
        }

        tracing::trace!(depth = top, "pop");

        // Dropping the frame drops its node handle and payload
        self.frames.truncate(top);
        top == target
    }

    /// Number of frames on the stack
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.len() == 0
    }

    /// Whether there is a frame to pop
    #[inline]
    pub fn has_frames(&self) -> bool {
        !self.is_empty()
    }

    /// Frame at stack position `index`, 0 being the bottom
    pub fn frame(&self, index: usize) -> Option<&Frame<N, C, P>> {
        self.frames.get(index)
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut Frame<N, C, P>> {
        self.frames.get_mut(index)
    }

    /// Frame `offset` levels below the top
    pub fn frame_from_top(&self, offset: usize) -> Option<&Frame<N, C, P>> {
        let index = self.depth().checked_sub(offset + 1)?;
        self.frames.get(index)
    }

    #[inline]
    pub fn top(&self) -> Option<&Frame<N, C, P>> {
        self.frame_from_top(0)
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame<N, C, P>> {
        let index = self.depth().checked_sub(1)?;
        self.frames.get_mut(index)
    }

    /// Frame right below the top
    #[inline]
    pub fn parent(&self) -> Option<&Frame<N, C, P>> {
        self.frame_from_top(1)
    }

    pub fn top_payload_mut(&mut self) -> Option<&mut P> {
        self.top_mut().map(Frame::payload_mut)
    }

    /// Frames from the bottom to the top
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = &Frame<N, C, P>> + ExactSizeIterator {
        self.frames.as_slice().iter()
    }

    /// Allocated frame capacity
    pub fn frame_capacity(&self) -> usize {
        self.frames.capacity()
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    #[inline]
    pub fn context(&self) -> &C {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Tear the stack down and return the context
    pub fn into_context(self) -> C {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChildList, DomTree, NodeId, NodeRef, NodeType};

    type Log = Vec<String>;
    type Stack<'a> = DomStack<NodeRef<'a>, Log, u32>;

    fn enter<'a>(stack: &mut Stack<'a>, node: NodeRef<'a>, payload: &mut u32) -> Option<NodeRef<'a>> {
        *payload = stack.depth() as u32 * 10;
        let entry = format!("enter {}", node.name());
        stack.context_mut().push(entry);
        Some(node)
    }

    fn exit<'a>(stack: &mut Stack<'a>, node: NodeRef<'a>, payload: &mut u32) -> Option<NodeRef<'a>> {
        let top = stack.top().map(|frame| frame.node().name()).unwrap_or("");
        let entry = format!("exit {top}@{} ({payload})", node.name());
        stack.context_mut().push(entry);
        None
    }

    fn reject_script<'a>(stack: &mut Stack<'a>, node: NodeRef<'a>, _: &mut u32) -> Option<NodeRef<'a>> {
        stack.context_mut().push(format!("saw {}", node.name()));
        (node.name() != "script").then_some(node)
    }

    fn substitute<'a>(_: &mut Stack<'a>, node: NodeRef<'a>, _: &mut u32) -> Option<NodeRef<'a>> {
        node.tree().node(NodeId::ROOT)
    }

    fn stamp_through_stack<'a>(
        stack: &mut Stack<'a>,
        node: NodeRef<'a>,
        _: &mut u32,
    ) -> Option<NodeRef<'a>> {
        *stack.top_payload_mut()? = 7;
        Some(node)
    }

    fn exit_reads_top<'a>(
        stack: &mut Stack<'a>,
        _: NodeRef<'a>,
        payload: &mut u32,
    ) -> Option<NodeRef<'a>> {
        let top = stack.top().map(|frame| *frame.payload()).unwrap_or(0);
        stack.context_mut().push(format!("exit {payload}/{top}"));
        None
    }

    fn callbacks<'a>() -> Callbacks<NodeRef<'a>, Log, u32> {
        Callbacks::new()
            .on_enter(NodeType::Element, enter)
            .on_exit(NodeType::Element, exit)
    }

    fn sample_tree() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        let script = tree.create_element("script");
        tree.append_child(tree.root(), div);
        tree.append_child(div, span);
        tree.append_child(div, script);
        (tree, div, span, script)
    }

    #[test]
    fn test_push_pop_depth() {
        let (tree, div, span, _) = sample_tree();
        let mut stack = Stack::new(Vec::new(), callbacks());

        assert!(stack.is_empty());
        stack.push(tree.document()).unwrap();
        stack.push(tree.node(div).unwrap()).unwrap();
        stack.push(tree.node(span).unwrap()).unwrap();
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.top().unwrap().node().name(), "span");
        assert_eq!(stack.parent().unwrap().node().name(), "div");
        assert_eq!(stack.frame(0).unwrap().node().name(), "#document");

        assert!(stack.pop());
        assert!(stack.pop());
        assert!(stack.pop());
        assert!(stack.is_empty());
        assert!(!stack.pop());
    }

    #[test]
    fn test_callbacks_see_new_top() {
        let (tree, div, span, _) = sample_tree();
        let mut stack = Stack::new(Vec::new(), callbacks());

        stack.push(tree.node(div).unwrap()).unwrap();
        stack.push(tree.node(span).unwrap()).unwrap();
        assert_eq!(*stack.frame(0).unwrap().payload(), 10);
        assert_eq!(*stack.top().unwrap().payload(), 20);

        stack.pop_to_depth(0);
        assert_eq!(
            stack.into_context(),
            vec![
                "enter div",
                "enter span",
                "exit span@span (20)",
                "exit div@div (10)",
            ]
        );
    }

    #[test]
    fn test_reject_restores_depth() {
        let (tree, div, _, script) = sample_tree();
        let callbacks = Callbacks::new().on_enter(NodeType::Element, reject_script);
        let mut stack = Stack::new(Vec::new(), callbacks);

        stack.push(tree.node(div).unwrap()).unwrap();
        let script = tree.node(script).unwrap();
        let err = stack.push(script).unwrap_err();

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().unwrap().node().name(), "div");
        assert_eq!(err.into_node(), Some(script));
    }

    #[test]
    fn test_substitute_node() {
        let (tree, div, _, _) = sample_tree();
        let callbacks = Callbacks::new().on_enter(NodeType::Element, substitute);
        let mut stack = Stack::new(Vec::new(), callbacks);

        let accepted = stack.push(tree.node(div).unwrap()).unwrap();
        assert_eq!(accepted.id(), NodeId::ROOT);
        assert_eq!(stack.top().unwrap().node().id(), NodeId::ROOT);
    }

    #[test]
    fn test_depth_limit_inclusive() {
        let (tree, div, _, _) = sample_tree();
        let config = StackConfig::new().with_max_depth(2);
        let mut stack = Stack::with_config(Vec::new(), callbacks(), config);
        let div = tree.node(div).unwrap();

        // One frame past the limit still fits
        for _ in 0..3 {
            stack.push(div).unwrap();
        }
        assert_eq!(stack.depth(), 3);

        let err = stack.push(div).unwrap_err();
        assert!(matches!(err, PushError::DepthExceeded { max_depth: 2, .. }));
        assert_eq!(stack.depth(), 3);
        assert_eq!(*stack.top().unwrap().payload(), 30);
        assert_eq!(stack.context().len(), 3);
    }

    #[test]
    fn test_payload_reset_on_pop() {
        let (tree, div, _, _) = sample_tree();
        let mut stack = Stack::new(Vec::new(), Callbacks::new());
        let div = tree.node(div).unwrap();

        stack.push(div).unwrap();
        *stack.top_payload_mut().unwrap() = 99;
        assert_eq!(*stack.frame(0).unwrap().payload(), 99);
        stack.pop();

        stack.push(div).unwrap();
        assert_eq!(*stack.top().unwrap().payload(), 0);
    }

    #[test]
    fn test_exit_receives_payload() {
        let (tree, div, _, _) = sample_tree();
        let mut stack = Stack::new(Vec::new(), callbacks());

        stack.push(tree.node(div).unwrap()).unwrap();
        *stack.top_payload_mut().unwrap() = 99;
        stack.pop();
        assert_eq!(stack.context().last().unwrap(), "exit div@div (99)");
    }

    #[test]
    fn test_payload_shared_with_stack() {
        let (tree, div, _, _) = sample_tree();
        let callbacks = Callbacks::new()
            .on_enter(NodeType::Element, stamp_through_stack)
            .on_exit(NodeType::Element, exit_reads_top);
        let mut stack = Stack::new(Vec::new(), callbacks);

        stack.push(tree.node(div).unwrap()).unwrap();
        assert_eq!(*stack.top().unwrap().payload(), 7);

        *stack.top_payload_mut().unwrap() = 5;
        stack.pop();
        assert_eq!(stack.into_context(), vec!["exit 5/5"]);
    }

    #[test]
    fn test_out_of_memory_drops_node() {
        let (tree, div, span, _) = sample_tree();
        let mut stack = Stack::new(Vec::new(), callbacks());
        stack.frames.limit_growth(1);

        stack.push(tree.node(div).unwrap()).unwrap();
        let err = stack.push(tree.node(span).unwrap()).unwrap_err();

        assert!(matches!(err, PushError::OutOfMemory));
        assert_eq!(err.into_node(), None);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().unwrap().node().name(), "div");
        assert_eq!(stack.context(), &vec!["enter div".to_string()]);
    }

    #[test]
    fn test_out_of_memory_releases_handle() {
        use std::rc::Rc;

        #[derive(Debug, Clone)]
        struct Shared(Rc<()>);

        impl DomNode for Shared {
            fn node_type(&self) -> NodeType {
                NodeType::Comment
            }

            fn node_name(&self) -> &str {
                "#comment"
            }

            fn child_at(&self, _: ChildList, _: usize) -> Option<Self> {
                None
            }
        }

        let handle = Rc::new(());
        let mut stack: DomStack<Shared, ()> = DomStack::new((), Callbacks::new());
        stack.frames.limit_growth(0);

        let err = stack.push(Shared(handle.clone())).unwrap_err();
        assert!(matches!(err, PushError::OutOfMemory));
        assert_eq!(Rc::strong_count(&handle), 1);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_frame_capacity_granularity() {
        let (tree, div, _, _) = sample_tree();
        let mut stack = Stack::new(Vec::new(), Callbacks::new());
        let div = tree.node(div).unwrap();

        stack.push(div).unwrap();
        assert_eq!(stack.frame_capacity(), FRAME_GRANULARITY);

        for _ in 0..FRAME_GRANULARITY {
            stack.push(div).unwrap();
        }
        assert_eq!(stack.frame_capacity(), 2 * FRAME_GRANULARITY);
        assert!(stack.frames().all(|frame| frame.node().id() == div.id()));
    }
}
