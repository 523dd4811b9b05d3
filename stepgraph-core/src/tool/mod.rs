mod node;
mod registry;

pub use node::{tools_condition, ToolNode, TOOLS_NODE};
pub use registry::ToolRegistry;

use crate::types::ToolError;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

// Re-export key types
pub use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

/// A synchronous tool the model can ask the graph to run
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn parameters_schema(&self) -> Value;

    /// Validate `args` against the tool's input shape and run it
    fn call(&self, args: Value) -> Result<Value, ToolError>;

    /// The tool definition sent to the model
    fn definition(&self) -> ChatCompletionTool {
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: self.name().to_string(),
                description: Some(self.description().to_string()),
                parameters: Some(self.parameters_schema()),
                strict: None,
            },
        }
    }
}

/// A tool with typed parameters and response.
///
/// Wrap it in [`TypedTool`] to register it: arguments are decoded into
/// `Params` before `execute` runs, so a shape mismatch never reaches it.
pub trait ToolFunction: Send + Sync {
    /// The parameter type for the tool
    type Params: JsonSchema + DeserializeOwned;
    /// The response type for the tool
    type Response: Serialize;

    /// Get the name of the tool
    fn name() -> &'static str;

    /// Get a description of what the tool does
    fn description() -> &'static str;

    /// Get the JSON Schema for the tool's parameters
    fn parameters_schema() -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    /// Execute the tool with the given parameters
    fn execute(&self, params: Self::Params) -> Result<Self::Response, ToolError>;
}

/// Adapts a [`ToolFunction`] to the untyped [`Tool`] interface
#[derive(Debug, Clone)]
pub struct TypedTool<T>(pub T);

impl<T: ToolFunction> Tool for TypedTool<T> {
    fn name(&self) -> &str {
        T::name()
    }

    fn description(&self) -> &str {
        T::description()
    }

    fn parameters_schema(&self) -> Value {
        T::parameters_schema()
    }

    fn call(&self, args: Value) -> Result<Value, ToolError> {
        let params: T::Params =
            serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
                tool: T::name().to_string(),
                message: e.to_string(),
            })?;
        let response = self.0.execute(params)?;
        serde_json::to_value(response).map_err(|e| ToolError::Serialization(e.to_string()))
    }
}
