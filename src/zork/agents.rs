use super::*;
use crate::prompted::{with_system_prompt, PromptedNode};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use stepgraph_core::{
    invoke_structured, ChatModel, Context, FunctionNode, KeyValueStore, Message, MessagesState,
    Node, NodeError, NodeOutput, NodeResult,
};
use tracing::debug;

/// Answers Zork questions and declines everything else
pub fn zork_agent(model: Arc<dyn ChatModel>) -> PromptedNode {
    PromptedNode::new(AGENT, AGENT_PROMPT, model)
}

/// Answers whatever reaches it; used behind a router that already filtered
/// off-topic questions
pub fn open_agent(model: Arc<dyn ChatModel>) -> PromptedNode {
    PromptedNode::new(AGENT, OPEN_AGENT_PROMPT, model)
}

/// Edits the agent's answer for correctness
pub fn fact_checker(model: Arc<dyn ChatModel>) -> PromptedNode {
    PromptedNode::new(FACT_CHECKER, FACT_CHECKER_PROMPT, model)
}

/// Classifies the question, replying with the bare word `zork` or `other`
pub fn text_router(model: Arc<dyn ChatModel>) -> PromptedNode {
    PromptedNode::new(ROUTER, ROUTER_PROMPT, model)
}

pub fn rejector() -> impl Node {
    FunctionNode::new(REJECTOR, |_ctx, _state: MessagesState| async {
        Ok(NodeOutput::message(Message::ai(REJECTION)))
    })
}

/// An agent that never consults a model
pub fn dumb_agent() -> impl Node {
    FunctionNode::new(AGENT, |_ctx, _state: MessagesState| async {
        Ok(NodeOutput::message(Message::ai(DUMB_ANSWER)))
    })
}

/// Answers with a random fact from the store's `zork:facts` set
pub struct RandomFactAgent {
    store: Arc<dyn KeyValueStore>,
}

impl RandomFactAgent {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Node for RandomFactAgent {
    async fn process(&self, _ctx: &Context, _state: &MessagesState) -> NodeResult {
        let fact = self
            .store
            .random_member(FACTS_KEY)
            .await?
            .unwrap_or_else(|| FALLBACK_FACT.to_string());
        Ok(NodeOutput::message(Message::ai(fact)))
    }

    fn name(&self) -> &str {
        AGENT
    }
}

impl Debug for RandomFactAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomFactAgent").finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Zork,
    Other,
}

/// Routing decision for a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicResponse {
    /// Whether the question is about Zork or not
    pub topic: Topic,
}

/// Classifies the question into a [`TopicResponse`] and appends it as a
/// structured message
pub struct StructuredRouterNode {
    model: Arc<dyn ChatModel>,
}

pub fn structured_router(model: Arc<dyn ChatModel>) -> StructuredRouterNode {
    StructuredRouterNode { model }
}

#[async_trait]
impl Node for StructuredRouterNode {
    async fn process(&self, _ctx: &Context, state: &MessagesState) -> NodeResult {
        let messages = with_system_prompt(STRUCTURED_ROUTER_PROMPT, state);
        let response: TopicResponse =
            invoke_structured(self.model.as_ref(), &messages, "router_response").await?;
        debug!(topic = ?response.topic, "Question classified");

        let value =
            serde_json::to_value(&response).map_err(|e| NodeError::Execution(e.to_string()))?;
        Ok(NodeOutput::message(Message::structured(value)))
    }

    fn name(&self) -> &str {
        ROUTER
    }
}

impl Debug for StructuredRouterNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredRouterNode").finish()
    }
}
