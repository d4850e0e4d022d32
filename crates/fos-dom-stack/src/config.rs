//! Stack configuration

/// Default maximum stack depth
pub const DEFAULT_MAX_DEPTH: usize = 4096;

/// DomStack configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig {
    /// Maximum depth before pushes fail with `DepthExceeded`
    ///
    /// The check is `depth > max_depth`, so one frame past the limit can
    /// still be pushed.
    pub max_depth: usize,
}

impl StackConfig {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for StackConfig {
    fn default() -> Self {
        Self::new()
    }
}
