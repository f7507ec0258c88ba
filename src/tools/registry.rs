//! Tool registry
//!
//! Maps tool names to boxed handlers and exposes the enabled schemas for
//! advertising to the model.
//!
//! Built-in tools:
//! - calculate: BODMAS arithmetic over the safe expression evaluator
//! - get_weather: current conditions for a city (cached, online)
//! - get_current_time: time for a known city or the local timezone
//! - store_memory: persist a long-term memory for the active user
//! - store_user_information: general facts in the shared knowledge base
//! - store_contact / update_contact: contact records in the memory store

use crate::cli::config::ToolsSection;
use crate::tools::implementations::{
    CalculateTool, StoreContactTool, StoreMemoryTool, StoreUserInfoTool, TimeTool,
    UpdateContactTool, WeatherTool,
};
use crate::tools::types::{Tool, ToolSchema};
use std::collections::HashMap;

/// Registry of dispatchable tools
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with every built-in tool, configured from the tools
    /// section (weather API key, cache TTL, default city)
    pub fn with_builtins(config: &ToolsSection) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CalculateTool));
        registry.register(Box::new(TimeTool));
        registry.register(Box::new(WeatherTool::from_config(config)));
        registry.register(Box::new(StoreMemoryTool));
        registry.register(Box::new(StoreUserInfoTool));
        registry.register(Box::new(StoreContactTool));
        registry.register(Box::new(UpdateContactTool));
        registry
    }

    /// Register a tool under its schema name
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.schema().name, tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Schemas of enabled tools only; this is what the model sees
    pub fn enabled_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .values()
            .map(|t| t.schema())
            .filter(|s| s.enabled)
            .collect()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
