/// Hop bound applied when a graph does not configure one
pub const DEFAULT_MAX_HOPS: usize = 25;

/// Settings shared by every run of a compiled graph
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum number of node invocations in a single run
    pub max_hops: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl RunConfig {
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }
}
