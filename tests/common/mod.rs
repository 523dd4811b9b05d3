use async_trait::async_trait;
use mockall::mock;
use stepgraph_core::{ChatModel, InvokeOptions, Message, ModelError};

mock! {
    pub Model {}
    #[async_trait]
    impl ChatModel for Model {
        async fn invoke(&self, messages: &[Message], options: InvokeOptions) -> Result<Message, ModelError>;
    }
}

/// The system prompt a prompted step sent, empty if there was none
pub fn system_prompt(messages: &[Message]) -> String {
    messages
        .first()
        .filter(|m| m.role() == stepgraph_core::Role::System)
        .map(|m| m.text_content().into_owned())
        .unwrap_or_default()
}
