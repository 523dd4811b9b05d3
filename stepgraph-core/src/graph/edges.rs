use crate::types::{MessagesState, NodeError};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result};
use std::sync::Arc;

/// Decides which node runs after a conditional edge's source.
///
/// Any `Fn(&MessagesState) -> String` is a router. Routers that need to
/// await something (a store lookup, say) implement the trait directly.
#[async_trait]
pub trait Router: Send + Sync {
    async fn route(&self, state: &MessagesState) -> std::result::Result<String, NodeError>;
}

#[async_trait]
impl<F> Router for F
where
    F: Fn(&MessagesState) -> String + Send + Sync,
{
    async fn route(&self, state: &MessagesState) -> std::result::Result<String, NodeError> {
        Ok(self(state))
    }
}

/// Represents a condition for edge transitions
pub type Condition = Arc<dyn Router>;

/// Edge definition for graph transitions
#[derive(Clone)]
pub enum Edge {
    /// Direct edge to next node
    Direct(String),
    /// Edge chosen by a router among an allow-list of targets
    Conditional {
        condition: Condition,
        targets: Vec<String>,
    },
}

impl Edge {
    /// Every node this edge can lead to
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Edge::Direct(target) => vec![target.as_str()],
            Edge::Conditional { targets, .. } => targets.iter().map(String::as_str).collect(),
        }
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Edge::Direct(target) => f.debug_tuple("Direct").field(target).finish(),
            Edge::Conditional { targets, .. } => f
                .debug_struct("Conditional")
                .field("condition", &"<condition>") // Placeholder for the router
                .field("targets", targets)
                .finish(),
        }
    }
}
