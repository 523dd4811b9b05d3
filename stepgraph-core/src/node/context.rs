use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Context for one graph run
#[derive(Debug, Clone)]
pub struct Context {
    /// Parent trace identifier
    pub parent_trace_id: Option<String>,
    /// Unique identifier for tracing
    pub trace_id: String,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    cancel: CancellationToken,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

impl Context {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            parent_trace_id: None,
            trace_id: trace_id.into(),
            metadata: HashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_parent_trace_id(mut self, parent_trace_id: impl Into<String>) -> Self {
        self.parent_trace_id = Some(parent_trace_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Ties the run to an externally owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Context for a nested run. Cancelling `self` also cancels the child.
    pub fn child(&self) -> Self {
        Self {
            parent_trace_id: Some(self.trace_id.clone()),
            trace_id: uuid::Uuid::new_v4().to_string(),
            metadata: self.metadata.clone(),
            cancel: self.cancel.child_token(),
        }
    }
}
