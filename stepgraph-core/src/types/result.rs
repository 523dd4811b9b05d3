use super::error::{CompileError, GraphError, NodeError};
use super::message::Message;

/// The partial state update produced by one step: messages to append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOutput {
    messages: Vec<Message>,
}

impl NodeOutput {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Output consisting of a single message
    pub fn message(message: Message) -> Self {
        Self::new(vec![message])
    }

    /// Output that appends nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl From<Message> for NodeOutput {
    fn from(message: Message) -> Self {
        Self::message(message)
    }
}

pub type NodeResult = Result<NodeOutput, NodeError>;

pub type GraphResult<T> = Result<T, GraphError>;

pub type CompileResult<T> = Result<T, CompileError>;
