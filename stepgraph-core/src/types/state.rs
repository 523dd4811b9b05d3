use super::message::{Message, Role};
use super::result::NodeOutput;

/// The message sequence threaded through one graph run.
///
/// Append-only: steps contribute new messages through [`NodeOutput`], earlier
/// entries are never rewritten or removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagesState {
    messages: Vec<Message>,
}

impl MessagesState {
    /// Creates a new empty message state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Gets the last message in the state
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The last message, if it was authored by the model
    pub fn last_ai_message(&self) -> Option<&Message> {
        self.last_message().filter(|m| m.role() == Role::AI)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Adds a message to the end of the state
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends a step's output
    pub fn append(&mut self, output: NodeOutput) {
        self.messages.extend(output.into_messages());
    }

    /// Messages added after the first `len` entries
    pub fn since(&self, len: usize) -> &[Message] {
        self.messages.get(len..).unwrap_or_default()
    }
}

impl From<Vec<Message>> for MessagesState {
    fn from(messages: Vec<Message>) -> Self {
        Self::from_messages(messages)
    }
}
