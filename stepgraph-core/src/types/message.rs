use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    AI,
    System,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::AI => "ai",
            Role::System => "system",
            Role::Tool => "tool",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a message: free text, or a JSON value produced by structured decoding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(Value),
}

impl MessageContent {
    /// Renders the content as text. Structured values are pretty-printed.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            MessageContent::Text(text) => Cow::Borrowed(text),
            MessageContent::Structured(value) => Cow::Owned(
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            ),
        }
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub args: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, args: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            args,
        }
    }
}

/// A single entry of the conversation.
///
/// Fields are private so a message cannot change once it has been appended
/// to a [`MessagesState`](super::MessagesState).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    role: Role,
    content: MessageContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl Message {
    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Creates a new human message
    pub fn human(content: impl Into<String>) -> Self {
        Self::text(Role::Human, content)
    }

    /// Creates a new AI message
    pub fn ai(content: impl Into<String>) -> Self {
        Self::text(Role::AI, content)
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    /// Creates a tool result answering the call with the given id
    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..Self::text(Role::Tool, content)
        }
    }

    /// Creates an AI message carrying a decoded JSON value
    pub fn structured(value: Value) -> Self {
        Self {
            role: Role::AI,
            content: MessageContent::Structured(value),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Adds tool calls to the message
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// The content rendered as text
    pub fn text_content(&self) -> Cow<'_, str> {
        self.content.as_text()
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        &self.tool_calls
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    pub fn tool_call_id(&self) -> Option<&str> {
        self.tool_call_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_creation() {
        let human_msg = Message::human("Hello");
        assert_eq!(human_msg.role(), Role::Human);

        let ai_msg = Message::ai("Hi there");
        assert_eq!(ai_msg.role(), Role::AI);
        assert!(!ai_msg.has_tool_calls());

        let system_msg = Message::system("System prompt");
        assert_eq!(system_msg.role(), Role::System);

        let tool_msg = Message::tool("10", "call_1");
        assert_eq!(tool_msg.role(), Role::Tool);
        assert_eq!(tool_msg.tool_call_id(), Some("call_1"));
    }

    #[test]
    fn test_structured_content_renders_pretty_json() {
        let msg = Message::structured(json!({ "topic": "zork" }));
        assert_eq!(msg.role(), Role::AI);
        assert_eq!(msg.text_content(), "{\n  \"topic\": \"zork\"\n}");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::AI).unwrap(), json!("ai"));
        assert_eq!(Role::Human.to_string(), "human");
    }

    #[test]
    fn test_tool_calls_skipped_when_empty() {
        let value = serde_json::to_value(Message::ai("done")).unwrap();
        assert!(value.get("tool_calls").is_none());

        let call = ToolCall::new("call_1", "AddArrayOfNumbers", json!({ "numbers": [2, 3, 5] }));
        let value = serde_json::to_value(Message::ai("").with_tool_calls(vec![call])).unwrap();
        assert_eq!(value["tool_calls"][0]["name"], "AddArrayOfNumbers");
    }
}
