//! A math agent that answers word problems by calling arithmetic tools

use crate::prompted::PromptedNode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use stepgraph_core::{
    tools_condition, Built, ChatModel, CompileResult, Context, Graph, GraphResult, Message,
    MessagesState, RunConfig, ToolError, ToolFunction, ToolNode, ToolRegistry, END, START,
    TOOLS_NODE,
};
use tracing::info;

pub const AGENT: &str = "agent";

pub const AGENT_PROMPT: &str = "You are a helpful assistant that solves math word problems. You have \
access to tools to help you do this. Whenever possible, you should use \
the tools.";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AddParams {
    #[schemars(description = "The numbers to add together")]
    pub numbers: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SubtractParams {
    #[schemars(description = "The number to subtract from")]
    pub a: f64,
    #[schemars(description = "The number to subtract")]
    pub b: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AddArrayOfNumbers;

impl ToolFunction for AddArrayOfNumbers {
    type Params = AddParams;
    type Response = Value;

    fn name() -> &'static str {
        "AddArrayOfNumbers"
    }

    fn description() -> &'static str {
        "Accepts an array of numbers and adds them together"
    }

    fn execute(&self, params: AddParams) -> Result<Value, ToolError> {
        Ok(number(params.numbers.iter().sum()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubtractTwoNumbers;

impl ToolFunction for SubtractTwoNumbers {
    type Params = SubtractParams;
    type Response = Value;

    fn name() -> &'static str {
        "SubtractTwoNumbers"
    }

    fn description() -> &'static str {
        "Subtracts the second number from the first"
    }

    fn execute(&self, params: SubtractParams) -> Result<Value, ToolError> {
        Ok(number(params.a - params.b))
    }
}

/// Whole results render without a fractional part, so 2+3+5 reads `10`
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

pub fn registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry
        .register_function(AddArrayOfNumbers)?
        .register_function(SubtractTwoNumbers)?;
    Ok(registry)
}

/// START → agent ⇄ tools, leaving for END once the agent stops calling tools
pub fn calculator_graph(
    model: Arc<dyn ChatModel>,
    registry: Arc<ToolRegistry>,
    run_config: RunConfig,
) -> CompileResult<Graph<Built>> {
    let agent = PromptedNode::new(AGENT, AGENT_PROMPT, model).with_tools(registry.definitions());

    let mut graph = Graph::new("calculator");
    graph
        .add_node(agent)?
        .add_node(ToolNode::new(registry))?
        .add_edge(START, AGENT)?
        .add_conditional_edge(AGENT, tools_condition, [TOOLS_NODE, END])?
        .add_edge(TOOLS_NODE, AGENT)?
        .with_run_config(run_config);
    graph.compile()
}

/// Run `question` through a calculator graph and return the final answer
pub async fn ask(graph: &Graph<Built>, ctx: &Context, question: &str) -> GraphResult<String> {
    let state = graph
        .run(ctx, MessagesState::from(vec![Message::human(question)]))
        .await?;
    info!(messages = state.len(), "Calculator finished");

    Ok(state
        .last_message()
        .map(|m| m.text_content().into_owned())
        .unwrap_or_default())
}
