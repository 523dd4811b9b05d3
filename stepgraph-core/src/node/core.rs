use crate::{Context, MessagesState, NodeResult};
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait for graph nodes
#[async_trait]
pub trait Node: Send + Sync + Debug {
    /// Process the current state and return the messages to append to it
    async fn process(&self, ctx: &Context, state: &MessagesState) -> NodeResult;

    /// Get the name of this node
    fn name(&self) -> &str;
}
