use super::model::{ChatModel, InvokeOptions};
use crate::types::{Message, ModelError, Role, ToolCall};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
        ChatCompletionRequestAssistantMessageContent, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
        ChatCompletionRequestUserMessageArgs,
        ChatCompletionToolType, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse, FunctionCall, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client as OpenAIClient,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct ChatCompletionRequestOptions {
    pub model: String,
    pub temperature: Option<f32>,
}

impl Default for ChatCompletionRequestOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE.into(),
        }
    }
}

/// [`ChatModel`] backed by the OpenAI chat completions API
pub struct OpenAiChatModel {
    client: OpenAIClient<OpenAIConfig>,
    options: ChatCompletionRequestOptions,
}

impl OpenAiChatModel {
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.into());
        Self {
            client: OpenAIClient::with_config(config),
            options: ChatCompletionRequestOptions::default(),
        }
    }

    pub fn with_options(self, options: ChatCompletionRequestOptions) -> Self {
        Self {
            client: self.client,
            options,
        }
    }

    pub fn options(&self) -> &ChatCompletionRequestOptions {
        &self.options
    }

    fn build_request(
        &self,
        messages: &[Message],
        options: InvokeOptions,
    ) -> Result<CreateChatCompletionRequest, ModelError> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(self.options.model.clone()).messages(messages);
        if let Some(temperature) = self.options.temperature {
            builder.temperature(temperature);
        }
        if !options.tools.is_empty() {
            builder.tools(options.tools);
        }
        if let Some(shape) = options.output_shape {
            builder.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: shape.description,
                    name: shape.name,
                    schema: Some(shape.schema),
                    strict: Some(false),
                },
            });
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn invoke(&self, messages: &[Message], options: InvokeOptions) -> Result<Message, ModelError> {
        let structured = options.output_shape.is_some();
        let request = self.build_request(messages, options)?;

        debug!(
            model = %self.options.model,
            messages = messages.len(),
            structured,
            "Requesting chat completion"
        );
        let response = self.client.chat().create(request).await?;

        from_response(response, structured)
    }
}

pub(crate) fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage, ModelError> {
    let text = message.text_content().into_owned();
    let request = match message.role() {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(text)
            .build()?
            .into(),
        Role::Human => ChatCompletionRequestUserMessageArgs::default()
            .content(text)
            .build()?
            .into(),
        Role::AI => {
            let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
            if !text.is_empty() {
                builder.content(ChatCompletionRequestAssistantMessageContent::Text(text));
            }
            if message.has_tool_calls() {
                let calls = message
                    .tool_calls()
                    .iter()
                    .map(|call| ChatCompletionMessageToolCall {
                        id: call.id.clone(),
                        r#type: ChatCompletionToolType::Function,
                        function: FunctionCall {
                            name: call.name.clone(),
                            arguments: call.args.to_string(),
                        },
                    })
                    .collect::<Vec<_>>();
                builder.tool_calls(calls);
            }
            builder.build()?.into()
        }
        Role::Tool => {
            let call_id = message.tool_call_id().ok_or_else(|| {
                ModelError::Conversion("tool message without a tool call id".to_string())
            })?;
            ChatCompletionRequestToolMessageArgs::default()
                .content(text)
                .tool_call_id(call_id)
                .build()?
                .into()
        }
    };
    Ok(request)
}

pub(crate) fn from_response(
    response: CreateChatCompletionResponse,
    structured: bool,
) -> Result<Message, ModelError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ModelError::EmptyResponse)?;
    let content = choice.message.content.unwrap_or_default();

    if structured {
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| ModelError::SchemaViolation(format!("reply is not JSON: {}", e)))?;
        return Ok(Message::structured(value));
    }

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| {
            let args = serde_json::from_str(&call.function.arguments).map_err(|e| {
                ModelError::Conversion(format!(
                    "arguments of {} are not JSON: {}",
                    call.function.name, e
                ))
            })?;
            Ok(ToolCall::new(call.id, call.function.name, args))
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    Ok(Message::ai(content).with_tool_calls(tool_calls))
}
