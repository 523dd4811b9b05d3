//! Parsing Zork room descriptions into structured data

use crate::prompted::with_system_prompt;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use stepgraph_core::{
    invoke_structured, Built, ChatModel, CompileResult, Context, Graph, Message, MessagesState,
    Node, NodeError, NodeOutput, NodeResult, RunConfig, END, START,
};

pub const PARSER: &str = "zork_parser";

pub const PARSER_PROMPT: &str = "You are a parser for Zork location descriptions. Given a location \
description from the classic text adventure game Zork, extract the \
location name, any objects present, and the available exits.";

/// The room shown in the transcript of the tutorial run
pub const KITCHEN: &str = "Kitchen
You are in the kitchen of the white house. A table seems to have been used recently for the preparation of
food. A passage leads to the west and a dark staircase can be seen leading upward. A dark chimney leads
down and to the east is a small window which is open.
A bottle is sitting on the table.
The glass bottle contains:
  A quantity of water
On the table is an elongated brown sack, smelling of hot peppers.";

/// A parsed Zork location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationDescription {
    /// The name of the current location
    pub location: String,
    /// Objects in the current location (e.g., window, tree, house)
    pub objects: Vec<String>,
    /// Available exits (e.g., north, up, window)
    pub exits: Vec<String>,
}

/// Appends the [`LocationDescription`] of the latest room description
pub struct LocationParser {
    model: Arc<dyn ChatModel>,
}

impl LocationParser {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Node for LocationParser {
    async fn process(&self, _ctx: &Context, state: &MessagesState) -> NodeResult {
        let messages = with_system_prompt(PARSER_PROMPT, state);
        let parsed: LocationDescription =
            invoke_structured(self.model.as_ref(), &messages, "location_description").await?;

        let value =
            serde_json::to_value(&parsed).map_err(|e| NodeError::Execution(e.to_string()))?;
        Ok(NodeOutput::message(Message::structured(value)))
    }

    fn name(&self) -> &str {
        PARSER
    }
}

impl Debug for LocationParser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationParser").finish()
    }
}

/// START → zork_parser → END
pub fn structured_output(model: Arc<dyn ChatModel>, run_config: RunConfig) -> CompileResult<Graph<Built>> {
    let mut graph = Graph::new("structured_output");
    graph
        .add_node(LocationParser::new(model))?
        .add_edge(START, PARSER)?
        .add_edge(PARSER, END)?
        .with_run_config(run_config);
    graph.compile()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_carries_field_descriptions() {
        let schema = serde_json::to_value(schemars::schema_for!(LocationDescription)).unwrap();
        let properties = &schema["properties"];

        assert_eq!(properties["location"]["description"], "The name of the current location");
        assert_eq!(properties["objects"]["type"], "array");
        assert_eq!(
            properties["exits"]["description"],
            "Available exits (e.g., north, up, window)"
        );
        assert_eq!(schema["description"], "A parsed Zork location");
    }

    #[test]
    fn structured_reply_keeps_field_order() {
        let parsed = LocationDescription {
            location: "Kitchen".to_string(),
            objects: vec!["table".to_string()],
            exits: vec!["west".to_string()],
        };
        let message = Message::structured(serde_json::to_value(&parsed).unwrap());

        assert_eq!(
            message.text_content(),
            "{\n  \"location\": \"Kitchen\",\n  \"objects\": [\n    \"table\"\n  ],\n  \"exits\": [\n    \"west\"\n  ]\n}"
        );
    }
}
