use super::{ChatCompletionTool, Tool, ToolFunction, TypedTool};
use crate::types::{ToolCall, ToolError};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result};
use std::sync::Arc;

/// Static mapping of tool name to implementation.
///
/// Filled once at startup, then shared read-only by every run.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T) -> std::result::Result<&mut Self, ToolError>
    where
        T: Tool + 'static,
    {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.tools.insert(name, Arc::new(tool));
        Ok(self)
    }

    /// Register a typed tool
    pub fn register_function<T>(&mut self, function: T) -> std::result::Result<&mut Self, ToolError>
    where
        T: ToolFunction + 'static,
    {
        self.register(TypedTool(function))
    }

    pub fn get(&self, name: &str) -> std::result::Result<&Arc<dyn Tool>, ToolError> {
        self.tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }

    /// Run the tool named by `call` with its arguments
    pub fn call(&self, call: &ToolCall) -> std::result::Result<Value, ToolError> {
        self.get(&call.name)?.call(call.args.clone())
    }

    /// Definitions of every registered tool, sorted by name
    pub fn definitions(&self) -> Vec<ChatCompletionTool> {
        self.names()
            .into_iter()
            .map(|name| self.tools[name].definition())
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Debug for ToolRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
