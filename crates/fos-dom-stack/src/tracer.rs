//! Debugging aids: tracing callbacks and a plain-text tree outline

use std::fmt::Write;

use crate::{Callbacks, DomNode, DomStack, NodeType};

/// Entry callback logging every pushed node
pub fn trace_enter<N: DomNode, C, P: Default + Clone>(
    stack: &mut DomStack<N, C, P>,
    node: N,
    _payload: &mut P,
) -> Option<N> {
    tracing::debug!(
        depth = stack.depth(),
        node_type = ?node.node_type(),
        name = node.node_name(),
        "enter"
    );
    Some(node)
}

/// Exit callback logging every popped frame and the frame it unwinds to
pub fn trace_exit<N: DomNode, C, P: Default + Clone>(
    stack: &mut DomStack<N, C, P>,
    node: N,
    _payload: &mut P,
) -> Option<N> {
    let closing = stack.top().map(|frame| frame.node().node_name()).unwrap_or("");
    tracing::debug!(depth = stack.depth(), closing, unwinding_to = node.node_name(), "exit");
    None
}

impl<N: DomNode, C, P: Default + Clone> Callbacks<N, C, P> {
    /// Table logging every push and pop through `tracing`
    pub fn tracing() -> Self {
        NodeType::ALL.into_iter().fold(Self::new(), |callbacks, node_type| {
            callbacks
                .on_enter(node_type, trace_enter::<N, C, P>)
                .on_exit(node_type, trace_exit::<N, C, P>)
        })
    }
}

fn outline_enter<N: DomNode>(stack: &mut DomStack<N, String>, node: N, _: &mut ()) -> Option<N> {
    let indent = stack.depth().saturating_sub(1) * 2;
    let line = format!("{:indent$}{:?} {}", "", node.node_type(), node.node_name());
    let _ = writeln!(stack.context_mut(), "{line}");
    Some(node)
}

fn outline_exit<N: DomNode>(_: &mut DomStack<N, String>, _: N, _: &mut ()) -> Option<N> {
    None
}

/// Render the subtree under `root` as an indented outline
///
/// One line per node: its type and name, indented two spaces per level.
pub fn outline<N: DomNode>(root: N) -> String {
    let callbacks = NodeType::ALL.into_iter().fold(Callbacks::new(), |callbacks, node_type| {
        callbacks
            .on_enter(node_type, outline_enter::<N>)
            .on_exit(node_type, outline_exit::<N>)
    });

    let mut stack = DomStack::new(String::new(), callbacks);
    if let Err(err) = stack.walk(root) {
        tracing::warn!(%err, "Could not outline DOM subtree");
    }
    stack.into_context()
}
