//! Configuration management for Pixy
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.pixy/config.toml

use crate::errors::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for Pixy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ollama: OllamaSection,
    pub agent: AgentSection,
    pub tools: ToolsSection,
    pub paths: PathsSection,
}

/// Ollama connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSection {
    pub host: String,
    pub port: u16,
    pub default_model: String,
}

/// Agent persona and behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub name: String,
    pub system_prompt: String,
    pub temperature: f64,
    /// History length past which the oldest messages get summarized
    pub history_limit: usize,
    /// Upper bound on model/tool round-trips per user message
    pub max_tool_rounds: usize,
}

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// OpenWeather API key; weather tool is disabled without one
    pub openweather_api_key: Option<String>,
    pub weather_cache_ttl_secs: u64,
    pub default_city: String,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Directory holding history.json, memory.json, user_data.json
    pub data_dir: PathBuf,
}

impl Default for OllamaSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11434,
            default_model: "llama3.1:8b".to_string(),
        }
    }
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            name: "Pixy".to_string(),
            system_prompt: "You are Pixy, a helpful personal assistant. You remember \
                            facts the user shares and use tools when they help."
                .to_string(),
            temperature: 0.7,
            history_limit: 40,
            max_tool_rounds: 4,
        }
    }
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            weather_cache_ttl_secs: 3600,
            default_city: "Bangalore".to_string(),
        }
    }
}

impl Default for PathsSection {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pixy");
        Self { data_dir }
    }
}

impl Config {
    /// Default config file location: ~/.pixy/config.toml
    pub fn default_path() -> PathBuf {
        PathsSection::default().data_dir.join("config.toml")
    }

    /// Load from an explicit path, or the default location. A missing file
    /// yields defaults; a present but invalid file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| AgentError::Config(format!("invalid config {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot work
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.agent.temperature) {
            return Err(AgentError::Config(format!(
                "temperature {} out of range 0.0..=2.0",
                self.agent.temperature
            )));
        }
        if self.agent.max_tool_rounds == 0 {
            return Err(AgentError::Config(
                "max_tool_rounds must be at least 1".to_string(),
            ));
        }
        if self.agent.history_limit < 4 {
            return Err(AgentError::Config(
                "history_limit must be at least 4".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL for the configured Ollama server
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.ollama.host, self.ollama.port)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AgentError::Config(format!("failed to render config: {}", e)))
    }
}
