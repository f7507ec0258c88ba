//! Tool execution types and structures

use crate::errors::{AgentError, Result};
use crate::store::{MemoryStore, UserDataStore};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tool schema definition: the shape advertised to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,

    /// Tool description shown to the model
    pub description: String,

    /// Parameter schema (JSON Schema object)
    pub parameters: serde_json::Value,

    /// Whether the tool is advertised and dispatchable
    pub enabled: bool,
}

impl ToolSchema {
    /// Create a new enabled tool schema
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            enabled: true,
        }
    }

    /// Names listed under `required` in the parameter schema
    pub fn required_params(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(|r| r.as_array())
            .map(|names| names.iter().filter_map(|n| n.as_str()).collect())
            .unwrap_or_default()
    }
}

/// Result of one tool invocation, appended to the conversation as a
/// tool-role message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_name: String,
    pub content: String,
}

impl ToolResult {
    pub fn new(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: content.into(),
        }
    }
}

/// Argument record supplied by the model for one invocation
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: HashMap<String, serde_json::Value>,
}

impl ToolArgs {
    pub fn new(values: HashMap<String, serde_json::Value>) -> Self {
        Self { values }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// A required string argument; error when missing or not a string
    pub fn required_str(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| AgentError::Tool(format!("missing required argument '{}'", key)))
    }

    /// An optional string argument; None when absent or not a string
    pub fn optional_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// An optional object argument as a map
    pub fn optional_object(&self, key: &str) -> Option<HashMap<String, serde_json::Value>> {
        self.values
            .get(key)
            .and_then(|v| v.as_object())
            .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

/// Shared state handed to every tool invocation
///
/// Stores are behind async mutexes; the executor dispatches calls one at a
/// time, the locks guard against callers embedding tools elsewhere.
#[derive(Clone)]
pub struct ToolContext {
    /// Identity the conversation is running as
    pub user_id: String,

    /// Long-term memory document (entries + contacts)
    pub memory: Arc<Mutex<MemoryStore>>,

    /// Per-user data document
    pub user_data: Arc<Mutex<UserDataStore>>,
}

impl ToolContext {
    pub fn new(
        user_id: impl Into<String>,
        memory: Arc<Mutex<MemoryStore>>,
        user_data: Arc<Mutex<UserDataStore>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            memory,
            user_data,
        }
    }
}

/// A dispatchable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Schema advertised to the model
    fn schema(&self) -> ToolSchema;

    /// Execute with a validated argument record
    async fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> ToolArgs {
        let map = value
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        ToolArgs::new(map)
    }

    #[test]
    fn test_required_str_present() {
        let a = args(json!({"expression": "2+2"}));
        assert_eq!(a.required_str("expression").unwrap(), "2+2");
    }

    #[test]
    fn test_required_str_missing() {
        let a = args(json!({}));
        assert!(a.required_str("expression").is_err());
    }

    #[test]
    fn test_required_str_wrong_type() {
        let a = args(json!({"expression": 42}));
        assert!(a.required_str("expression").is_err());
    }

    #[test]
    fn test_optional_object() {
        let a = args(json!({"other_data": {"steps": 4000}}));
        let obj = a.optional_object("other_data").unwrap();
        assert_eq!(obj["steps"], json!(4000));
        assert!(a.optional_object("missing").is_none());
    }

    #[test]
    fn test_schema_required_params() {
        let schema = ToolSchema::new(
            "t",
            "d",
            json!({
                "type": "object",
                "properties": {"a": {"type": "string"}},
                "required": ["a", "b"]
            }),
        );
        assert_eq!(schema.required_params(), vec!["a", "b"]);
    }

    #[test]
    fn test_schema_without_required_list() {
        let schema = ToolSchema::new("t", "d", json!({"type": "object", "properties": {}}));
        assert!(schema.required_params().is_empty());
    }
}
