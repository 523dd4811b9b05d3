use super::ToolRegistry;
use crate::graph::END;
use crate::node::{Context, Node};
use crate::types::{Message, MessagesState, NodeError, NodeOutput, NodeResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Default name of the tool-dispatch node
pub const TOOLS_NODE: &str = "tools";

/// Executes the tool calls carried by the latest AI message.
///
/// Appends one tool message per call, tagged with the call id so the next
/// agent step can pair results with requests.
#[derive(Debug)]
pub struct ToolNode {
    name: String,
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            name: TOOLS_NODE.to_string(),
            registry,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn process(&self, _ctx: &Context, state: &MessagesState) -> NodeResult {
        let request = state.last_ai_message().ok_or_else(|| {
            NodeError::Execution("no AI message to take tool calls from".to_string())
        })?;

        let mut results = Vec::with_capacity(request.tool_calls().len());
        for call in request.tool_calls() {
            debug!(tool = %call.name, call_id = %call.id, "Dispatching tool call");
            let value = self.registry.call(call)?;
            results.push(Message::tool(render(value), call.id.clone()));
        }
        Ok(NodeOutput::new(results))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn render(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Routes to [`TOOLS_NODE`] while the model keeps requesting tools, END otherwise
pub fn tools_condition(state: &MessagesState) -> String {
    match state.last_ai_message() {
        Some(message) if message.has_tool_calls() => TOOLS_NODE.to_string(),
        _ => END.to_string(),
    }
}
