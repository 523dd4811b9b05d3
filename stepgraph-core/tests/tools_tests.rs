use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use stepgraph_core::prelude::*;
use tokio_test::{assert_err, assert_ok};

/// Parameters for the addition tool
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct AddParams {
    #[schemars(description = "The numbers to add together")]
    numbers: Vec<i64>,
}

struct Add;

impl ToolFunction for Add {
    type Params = AddParams;
    type Response = i64;

    fn name() -> &'static str {
        "AddArrayOfNumbers"
    }

    fn description() -> &'static str {
        "Accepts an array of numbers and adds them together"
    }

    fn execute(&self, params: AddParams) -> Result<i64, ToolError> {
        Ok(params.numbers.iter().sum())
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct DivideParams {
    a: i64,
    b: i64,
}

struct Divide;

impl ToolFunction for Divide {
    type Params = DivideParams;
    type Response = i64;

    fn name() -> &'static str {
        "DivideTwoNumbers"
    }

    fn description() -> &'static str {
        "Divides the first number by the second"
    }

    fn execute(&self, params: DivideParams) -> Result<i64, ToolError> {
        params
            .a
            .checked_div(params.b)
            .ok_or_else(|| ToolError::Execution("division by zero".to_string()))
    }
}

fn registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry
        .register_function(Add)
        .unwrap()
        .register_function(Divide)
        .unwrap();
    Arc::new(registry)
}

fn call(id: &str, name: &str, args: serde_json::Value) -> ToolCall {
    ToolCall::new(id, name, args)
}

#[test]
fn test_typed_tool_schema() {
    let tool = TypedTool(Add);
    assert_eq!(tool.name(), "AddArrayOfNumbers");

    let schema = tool.parameters_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["numbers"]["type"], "array");
    assert_eq!(
        schema["properties"]["numbers"]["description"],
        "The numbers to add together"
    );
    assert_eq!(schema["required"], json!(["numbers"]));

    let definition = tool.definition();
    assert_eq!(definition.function.name, "AddArrayOfNumbers");
    assert_eq!(
        definition.function.description.as_deref(),
        Some("Accepts an array of numbers and adds them together")
    );
}

#[test]
fn test_registry_dispatch() {
    let registry = registry();
    assert_eq!(registry.names(), vec!["AddArrayOfNumbers", "DivideTwoNumbers"]);
    assert_eq!(registry.definitions().len(), 2);

    let sum = assert_ok!(registry.call(&call("1", "AddArrayOfNumbers", json!({ "numbers": [2, 3, 5] }))));
    assert_eq!(sum, json!(10));
}

#[test]
fn test_registry_rejects_unknown_and_malformed_calls() {
    let registry = registry();

    let err = assert_err!(registry.call(&call("1", "Multiply", json!({}))));
    assert!(matches!(err, ToolError::UnknownTool(name) if name == "Multiply"));

    let err = assert_err!(registry.call(&call("2", "AddArrayOfNumbers", json!({ "numbers": "2,3" }))));
    assert!(matches!(err, ToolError::InvalidArguments { ref tool, .. } if tool == "AddArrayOfNumbers"));

    let err = assert_err!(registry.call(&call(
        "3",
        "AddArrayOfNumbers",
        json!({ "numbers": [1], "extra": true })
    )));
    assert!(matches!(err, ToolError::InvalidArguments { .. }));

    let err = assert_err!(registry.call(&call("4", "DivideTwoNumbers", json!({ "a": 1, "b": 0 }))));
    assert!(matches!(err, ToolError::Execution(_)));
}

#[test]
fn test_duplicate_tool_rejected() {
    let mut registry = ToolRegistry::new();
    registry.register_function(Add).unwrap();
    let err = registry.register_function(Add).unwrap_err();
    assert!(matches!(err, ToolError::DuplicateTool(_)));
}

#[tokio::test]
async fn test_tool_node_appends_one_result_per_call() {
    let node = ToolNode::new(registry());
    let state = MessagesState::from(vec![
        Message::human("what is 2+3+5, and 9/3?"),
        Message::ai("").with_tool_calls(vec![
            call("call_a", "AddArrayOfNumbers", json!({ "numbers": [2, 3, 5] })),
            call("call_b", "DivideTwoNumbers", json!({ "a": 9, "b": 3 })),
        ]),
    ]);

    let output = assert_ok!(node.process(&Context::default(), &state).await);
    let results = output.messages();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0], Message::tool("10", "call_a"));
    assert_eq!(results[1], Message::tool("3", "call_b"));
}

#[tokio::test]
async fn test_tool_node_surfaces_unknown_tool() {
    let node = ToolNode::new(registry());
    let state = MessagesState::from(vec![Message::ai("")
        .with_tool_calls(vec![call("call_a", "Multiply", json!({ "a": 2, "b": 3 }))])]);

    let err = assert_err!(node.process(&Context::default(), &state).await);
    assert!(matches!(err, NodeError::Tool(ToolError::UnknownTool(_))));
}

#[test]
fn test_tools_condition() {
    let requesting = MessagesState::from(vec![Message::ai("")
        .with_tool_calls(vec![call("1", "AddArrayOfNumbers", json!({ "numbers": [1] }))])]);
    assert_eq!(tools_condition(&requesting), TOOLS_NODE);

    let answered = MessagesState::from(vec![Message::ai("The answer is 10.")]);
    assert_eq!(tools_condition(&answered), END);

    let tool_result = MessagesState::from(vec![Message::tool("10", "1")]);
    assert_eq!(tools_condition(&tool_result), END);
}

#[tokio::test]
async fn test_agent_tool_loop_terminates() {
    // Scripted agent: asks for the sum first, answers once a tool result is present
    let agent = FunctionNode::new("agent", |_ctx, state: MessagesState| async move {
        let reply = match state.last_message() {
            Some(m) if m.role() == Role::Tool => {
                Message::ai(format!("2 + 3 + 5 = {}", m.text_content()))
            }
            _ => Message::ai("").with_tool_calls(vec![ToolCall::new(
                "call_1",
                "AddArrayOfNumbers",
                json!({ "numbers": [2, 3, 5] }),
            )]),
        };
        Ok(NodeOutput::message(reply))
    });

    let mut graph = Graph::new("calculator");
    graph
        .add_node(agent)
        .unwrap()
        .add_node(ToolNode::new(registry()))
        .unwrap()
        .add_edge(START, "agent")
        .unwrap()
        .add_conditional_edge("agent", tools_condition, [TOOLS_NODE, END])
        .unwrap()
        .add_edge(TOOLS_NODE, "agent")
        .unwrap();
    let graph = graph.compile().unwrap();

    let state = assert_ok!(
        graph
            .run(&Context::default(), MessagesState::from(vec![Message::human("what is 2+3+5?")]))
            .await
    );

    let roles: Vec<Role> = state.messages().iter().map(|m| m.role()).collect();
    assert_eq!(roles, vec![Role::Human, Role::AI, Role::Tool, Role::AI]);
    assert_eq!(state.messages()[2].tool_call_id(), Some("call_1"));
    assert!(state.last_message().unwrap().text_content().contains("10"));
}
