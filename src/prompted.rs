use async_trait::async_trait;
use std::fmt::{Debug, Formatter, Result};
use std::sync::Arc;
use stepgraph_core::{
    ChatCompletionTool, ChatModel, Context, InvokeOptions, Message, MessagesState, Node,
    NodeOutput, NodeResult,
};
use tracing::debug;

/// A step that prefixes the conversation with a system prompt, asks the
/// model for a reply and appends it.
pub struct PromptedNode {
    name: String,
    prompt: String,
    model: Arc<dyn ChatModel>,
    tools: Vec<ChatCompletionTool>,
}

impl PromptedNode {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            model,
            tools: Vec::new(),
        }
    }

    /// Let the model request these tools
    pub fn with_tools(mut self, tools: Vec<ChatCompletionTool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// `[system(prompt), ..state]`, the message list every prompted step sends
pub fn with_system_prompt(prompt: &str, state: &MessagesState) -> Vec<Message> {
    let mut messages = Vec::with_capacity(state.len() + 1);
    messages.push(Message::system(prompt));
    messages.extend(state.messages().iter().cloned());
    messages
}

#[async_trait]
impl Node for PromptedNode {
    async fn process(&self, _ctx: &Context, state: &MessagesState) -> NodeResult {
        let messages = with_system_prompt(&self.prompt, state);
        let options = InvokeOptions::default().with_tools(self.tools.clone());

        let reply = self.model.invoke(&messages, options).await?;
        debug!(
            node = %self.name,
            tool_calls = reply.tool_calls().len(),
            "Model replied"
        );
        Ok(NodeOutput::message(reply))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Debug for PromptedNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("PromptedNode")
            .field("name", &self.name)
            .field("tools", &self.tools.len())
            .finish()
    }
}
