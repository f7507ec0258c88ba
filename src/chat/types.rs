//! Wire types for the Ollama /api/chat endpoint

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A role-tagged conversation message
///
/// This is both the wire shape sent to Ollama and the record shape persisted
/// in the history document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,

    /// Tool invocations requested by the model, present only on
    /// assistant messages that ask for tool execution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Tool result message: `{tool_name, content}` appended to history
    /// after a dispatched tool call
    pub fn tool(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = tool_name.into();
        let body = content.into();
        Self::new(Role::Tool, format!("[{}] {}", name, body))
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Whether the model asked for any tool execution
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A single tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: ToolCallFunction,
}

/// Name and arguments of a requested tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,

    /// Argument record as produced by the model; validated against the
    /// tool schema before dispatch
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,
}

/// Per-request model options
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    pub temperature: f64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self { temperature: 0.7 }
    }
}
