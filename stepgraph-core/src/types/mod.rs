mod error;
mod message;
mod result;
mod state;

pub use error::{CompileError, GraphError, ModelError, NodeError, StoreError, ToolError};
pub use message::{Message, MessageContent, Role, ToolCall};
pub use result::{CompileResult, GraphResult, NodeOutput, NodeResult};
pub use state::MessagesState;
