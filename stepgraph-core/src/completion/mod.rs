mod client;
mod model;

pub use client::{ChatCompletionRequestOptions, OpenAiChatModel};
pub use model::{decode_structured, invoke_structured, ChatModel, InvokeOptions, OutputShape};
