//! Push errors

/// Why a node could not be pushed
///
/// Variants that leave the caller in charge of the node carry it back.
/// `OutOfMemory` does not: the stack has already dropped the node.
#[derive(Debug, thiserror::Error)]
pub enum PushError<N> {
    #[error("DOM stack depth limit of {max_depth} exceeded")]
    DepthExceeded { node: N, max_depth: usize },

    #[error("Out of memory growing the DOM stack")]
    OutOfMemory,

    #[error("Node rejected by entry callback")]
    Rejected(N),
}

impl<N> PushError<N> {
    /// Recover the node if it is still the caller's
    pub fn into_node(self) -> Option<N> {
        match self {
            PushError::DepthExceeded { node, .. } | PushError::Rejected(node) => Some(node),
            PushError::OutOfMemory => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PushError::Rejected(_))
    }
}
