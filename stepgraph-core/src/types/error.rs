use async_openai::error::OpenAIError;
use std::time::Duration;
use thiserror::Error;

/// Error type for tool lookup and dispatch
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Execution: {0}")]
    Execution(String),

    #[error("Serialization: {0}")]
    Serialization(String),
}

/// Error type for chat model invocations
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model request: {0}")]
    Request(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("Model returned no choices")]
    EmptyResponse,

    #[error("Message conversion: {0}")]
    Conversion(String),
}

impl From<OpenAIError> for ModelError {
    fn from(err: OpenAIError) -> Self {
        ModelError::Request(err.to_string())
    }
}

/// Error type for the key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Error type for node operations
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Node execution: {0}")]
    Execution(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Step timed out after {0:?}")]
    Timeout(Duration),

    #[error("Subgraph execution: {0}")]
    SubgraphExecution(String),

    #[error("Other: {0}")]
    Other(String),
}

impl From<anyhow::Error> for NodeError {
    fn from(err: anyhow::Error) -> Self {
        NodeError::Other(err.to_string())
    }
}

/// Errors raised while defining a graph. None of these can occur once
/// `compile` has succeeded.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CompileError {
    #[error("Node already registered: {0}")]
    DuplicateNode(String),

    #[error("Node not found: {0}")]
    UnknownNode(String),

    #[error("Node already has outgoing edges: {0}")]
    DuplicateEdge(String),

    #[error("Node has no outgoing edge: {0}")]
    DanglingNode(String),

    #[error("Graph has no edge from START")]
    MissingEntry,

    #[error("Reserved node name: {0}")]
    ReservedName(String),

    #[error("Conditional edge from {0} has no allowed targets")]
    EmptyRouteTargets(String),
}

/// Errors that abort a single run. The compiled graph is left untouched.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    UnknownNode(String),

    #[error("No transition defined from node: {0}")]
    DanglingNode(String),

    #[error("Route from {from} to {target} is not an allowed target")]
    InvalidRoute { from: String, target: String },

    #[error("Node {node} failed: {source}")]
    StepExecution {
        node: String,
        #[source]
        source: NodeError,
    },

    #[error("Run exceeded {0} hops")]
    MaxHopsExceeded(usize),

    #[error("Run cancelled")]
    Cancelled,
}

impl GraphError {
    /// The step failure behind a `StepExecution`, if any
    pub fn node_error(&self) -> Option<&NodeError> {
        match self {
            GraphError::StepExecution { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_execution_display_names_node_and_cause() {
        let err = GraphError::StepExecution {
            node: "tools".to_string(),
            source: NodeError::Tool(ToolError::UnknownTool("Divide".to_string())),
        };
        let s = err.to_string();
        assert!(s.contains("tools"), "Display should name the node: {}", s);
        assert!(s.contains("Divide"), "Display should carry the cause: {}", s);
        assert!(matches!(
            err.node_error(),
            Some(NodeError::Tool(ToolError::UnknownTool(_)))
        ));
    }

    #[test]
    fn invalid_route_display_names_target() {
        let err = GraphError::InvalidRoute {
            from: "zork_router".to_string(),
            target: "nowhere".to_string(),
        };
        assert!(err.to_string().contains("nowhere"));
        assert!(err.node_error().is_none());
    }
}
