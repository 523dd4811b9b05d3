//! stepgraph-core runs graphs of LLM-invoking steps over an append-only
//! message state: a typestate builder, an executor with conditional routing,
//! a hop bound and cancellation, a tool-dispatch node, and the chat model and
//! key-value seams step bodies are written against.

pub mod completion;
pub mod graph;
pub mod node;
pub mod store;
pub mod tool;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types
    pub use crate::completion::{
        decode_structured, invoke_structured, ChatCompletionRequestOptions, ChatModel,
        InvokeOptions, OpenAiChatModel, OutputShape,
    };
    pub use crate::graph::{Built, Condition, Edge, Graph, NotBuilt, Router, RunConfig, END, START};
    pub use crate::node::{Context, FunctionNode, Node, NodeConfig};
    pub use crate::store::{KeyValueStore, MemoryStore};
    pub use crate::tool::{
        tools_condition, ChatCompletionTool, Tool, ToolFunction, ToolNode, ToolRegistry, TypedTool,
        TOOLS_NODE,
    };
    pub use crate::types::{
        CompileError, CompileResult, GraphError, GraphResult, Message, MessageContent,
        MessagesState, ModelError, NodeError, NodeOutput, NodeResult, Role, StoreError, ToolCall,
        ToolError,
    };
}

// Re-export main types
pub use prelude::*;
pub use graph::DEFAULT_MAX_HOPS;
pub use tokio_util::sync::CancellationToken;
