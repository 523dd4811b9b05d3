use std::time::Duration;

/// Per-node execution settings
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Upper bound on a single invocation of the node
    pub timeout: Option<Duration>,
}

impl NodeConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
