use crate::node::{Context, Node};
use crate::types::{MessagesState, NodeResult};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result};
use std::future::Future;

/// A node that processes state using a function.
///
/// The function receives its own snapshot of the state, so the returned
/// future does not borrow from the run.
pub struct FunctionNode<F> {
    name: String,
    f: F,
}

impl<F, Fut> FunctionNode<F>
where
    F: Fn(&Context, MessagesState) -> Fut + Send + Sync,
    Fut: Future<Output = NodeResult> + Send,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F, Fut> Node for FunctionNode<F>
where
    F: Fn(&Context, MessagesState) -> Fut + Send + Sync,
    Fut: Future<Output = NodeResult> + Send,
{
    async fn process(&self, ctx: &Context, state: &MessagesState) -> NodeResult {
        (self.f)(ctx, state.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> Debug for FunctionNode<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("FunctionNode")
            .field("name", &self.name)
            // the closure is opaque
            .finish()
    }
}
