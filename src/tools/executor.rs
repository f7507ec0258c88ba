//! Validated tool dispatch
//!
//! Looks the requested tool up by name, checks the argument record against
//! the schema's required list before dispatch, and folds every failure into
//! an error-text `ToolResult` so one bad invocation never aborts the
//! conversation loop.

use crate::chat::ToolCall;
use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ToolArgs, ToolContext, ToolResult};
use tracing::{debug, warn};

/// Dispatches model-requested tool calls against a registry
pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch one requested invocation.
    ///
    /// Unknown names, disabled tools, failed validation, and handler errors
    /// all come back as a `ToolResult` whose content describes the problem;
    /// the model gets to read the error and recover.
    pub async fn dispatch(&self, call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        let name = call.function.name.as_str();

        let Some(tool) = self.registry.get(name) else {
            warn!(tool = name, "model requested unknown tool");
            return ToolResult::new(name, format!("Error: unknown tool '{}'", name));
        };

        let schema = tool.schema();
        if !schema.enabled {
            return ToolResult::new(name, format!("Error: tool '{}' is disabled", name));
        }

        let args = ToolArgs::new(call.function.arguments.clone());
        for required in schema.required_params() {
            if !args.contains(required) {
                warn!(tool = name, missing = required, "tool call missing required argument");
                return ToolResult::new(
                    name,
                    format!("Error: missing required argument '{}'", required),
                );
            }
        }

        debug!(tool = name, "dispatching tool call");
        match tool.execute(&args, ctx).await {
            Ok(content) => ToolResult::new(name, content),
            Err(e) => {
                warn!(tool = name, error = %e, "tool execution failed");
                ToolResult::new(name, format!("Error: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ToolCallFunction;
    use crate::cli::config::ToolsSection;
    use crate::store::{MemoryStore, UserDataStore};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    fn test_context(dir: &TempDir) -> ToolContext {
        ToolContext::new(
            "test-user",
            Arc::new(Mutex::new(MemoryStore::open(dir.path().join("memory.json")))),
            Arc::new(Mutex::new(UserDataStore::open(
                dir.path().join("user_data.json"),
            ))),
        )
    }

    fn call(name: &str, arguments: serde_json::Value) -> ToolCall {
        let arguments: HashMap<String, serde_json::Value> = arguments
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        ToolCall {
            function: ToolCallFunction {
                name: name.to_string(),
                arguments,
            },
        }
    }

    fn executor() -> ToolExecutor {
        ToolExecutor::new(crate::tools::ToolRegistry::with_builtins(
            &ToolsSection::default(),
        ))
    }

    #[tokio::test]
    async fn test_dispatch_calculate() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(&dir);
        let wrapped = call("calculate", serde_json::json!({"expression": "2+3*4"}));

        let result = executor().dispatch(&wrapped, &ctx).await;
        assert_eq!(result.tool_name, "calculate");
        assert_eq!(result.content, "14");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(&dir);
        let f = call("launch_rockets", serde_json::json!({}));

        let result = executor().dispatch(&f, &ctx).await;
        assert!(result.content.contains("unknown tool"));
    }

    #[tokio::test]
    async fn test_missing_required_argument_rejected_before_dispatch() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(&dir);
        let f = call("calculate", serde_json::json!({}));

        let result = executor().dispatch(&f, &ctx).await;
        assert!(result.content.contains("missing required argument 'expression'"));
    }

    #[tokio::test]
    async fn test_handler_error_becomes_result_text() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(&dir);
        let f = call("calculate", serde_json::json!({"expression": "10/0"}));

        let result = executor().dispatch(&f, &ctx).await;
        assert!(result.content.starts_with("Error:"));
        assert!(result.content.contains("zero"));
    }

    #[tokio::test]
    async fn test_store_memory_dispatch_persists() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(&dir);
        let f = call(
            "store_memory",
            serde_json::json!({"memory_content": "my name is John"}),
        );

        let result = executor().dispatch(&f, &ctx).await;
        assert!(result.content.contains("Memory stored"));

        let user_data = ctx.user_data.lock().await;
        assert_eq!(user_data.memories("test-user").len(), 1);
        assert_eq!(user_data.memories("test-user")[0].memory, "my name is John");
    }
}
