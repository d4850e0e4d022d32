//! fOS DOM Stack - Iterative DOM traversal
//!
//! Walks a DOM tree without recursion. A [`DomStack`] keeps one [`Frame`]
//! per tree depth, from the walk root down to the node being visited, and
//! dispatches per-node-type callbacks when frames are pushed and popped.
//!
//! Parsers use the same stack to close constructs that are not perfectly
//! nested: [`DomStack::unwind_to`] pops every frame opened after the
//! nearest matching ancestor, letting each exit callback see the ancestor
//! it is closing into.

mod callbacks;
mod config;
mod error;
mod interner;
mod node;
mod stack;
mod tracer;
mod tree;

pub use callbacks::{Callback, Callbacks};
pub use config::{StackConfig, DEFAULT_MAX_DEPTH};
pub use error::PushError;
pub use interner::{InternedString, StringInterner};
pub use node::{ChildList, DomNode, NodeType};
pub use stack::{DomStack, Frame, FRAME_GRANULARITY};
pub use tracer::{outline, trace_enter, trace_exit};
pub use tree::{DomTree, Node, NodeData, NodeId, NodeRef};
