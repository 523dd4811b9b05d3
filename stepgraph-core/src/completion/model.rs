use crate::types::{Message, MessageContent, ModelError};
use async_openai::types::ChatCompletionTool;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The JSON shape a structured reply must take
#[derive(Debug, Clone, PartialEq)]
pub struct OutputShape {
    pub name: String,
    pub description: Option<String>,
    pub schema: Value,
}

impl OutputShape {
    /// Shape derived from a Rust type's JSON Schema
    pub fn of<T: JsonSchema>(name: impl Into<String>) -> Self {
        let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null);
        let description = schema
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            name: name.into(),
            description,
            schema,
        }
    }
}

/// Per-call options for [`ChatModel::invoke`]
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Constrain the reply to this shape
    pub output_shape: Option<OutputShape>,
    /// Tools the model may request
    pub tools: Vec<ChatCompletionTool>,
}

impl InvokeOptions {
    pub fn with_output_shape(mut self, shape: OutputShape) -> Self {
        self.output_shape = Some(shape);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ChatCompletionTool>) -> Self {
        self.tools = tools;
        self
    }
}

/// A chat-completion backend.
///
/// When `options.output_shape` is set the returned message carries
/// structured content, or the call fails with
/// [`ModelError::SchemaViolation`].
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, messages: &[Message], options: InvokeOptions) -> Result<Message, ModelError>;
}

/// Ask for a reply shaped like `T` and decode it
pub async fn invoke_structured<T>(
    model: &dyn ChatModel,
    messages: &[Message],
    name: &str,
) -> Result<T, ModelError>
where
    T: JsonSchema + DeserializeOwned,
{
    let options = InvokeOptions::default().with_output_shape(OutputShape::of::<T>(name));
    let reply = model.invoke(messages, options).await?;
    decode_structured(&reply)
}

/// Decode a message's content as `T`. Text content is parsed as JSON first.
pub fn decode_structured<T: DeserializeOwned>(message: &Message) -> Result<T, ModelError> {
    let value = match message.content() {
        MessageContent::Structured(value) => value.clone(),
        MessageContent::Text(text) => serde_json::from_str(text)
            .map_err(|e| ModelError::SchemaViolation(format!("reply is not JSON: {}", e)))?,
    };
    serde_json::from_value(value).map_err(|e| ModelError::SchemaViolation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    /// Where the player is standing
    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct Spot {
        location: String,
    }

    #[test]
    fn output_shape_uses_schema_and_doc_comment() {
        let shape = OutputShape::of::<Spot>("spot");
        assert_eq!(shape.name, "spot");
        assert_eq!(shape.description.as_deref(), Some("Where the player is standing"));
        assert_eq!(shape.schema["properties"]["location"]["type"], "string");
    }

    #[test]
    fn decode_structured_accepts_structured_and_text() {
        let structured = Message::structured(json!({ "location": "Kitchen" }));
        assert_eq!(
            decode_structured::<Spot>(&structured).unwrap(),
            Spot { location: "Kitchen".into() }
        );

        let text = Message::ai(r#"{"location": "Attic"}"#);
        assert_eq!(decode_structured::<Spot>(&text).unwrap().location, "Attic");
    }

    #[test]
    fn decode_structured_rejects_wrong_shape() {
        let wrong = Message::structured(json!({ "room": "Kitchen" }));
        assert!(matches!(
            decode_structured::<Spot>(&wrong),
            Err(ModelError::SchemaViolation(_))
        ));

        let prose = Message::ai("The kitchen.");
        assert!(matches!(
            decode_structured::<Spot>(&prose),
            Err(ModelError::SchemaViolation(_))
        ));
    }
}
