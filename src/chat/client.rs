//! HTTP client for the Ollama chat API
//!
//! POST /api/chat with `stream: false`; tool schemas are advertised in
//! Ollama's `{"type": "function", "function": {...}}` envelope.

use crate::chat::types::{ChatMessage, ChatOptions};
use crate::errors::{AgentError, Result};
use crate::tools::ToolSchema;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Request timeout; local models can be slow to first token
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
    options: &'a ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

/// Ollama chat client
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Create a client against a base URL (e.g. `http://127.0.0.1:11434`)
    /// bound to one model name
    pub fn new(base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AgentError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    /// Model name this client is bound to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the conversation and tool definitions, returning the model's
    /// response message (which may carry tool call requests)
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
        options: &ChatOptions,
    ) -> Result<ChatMessage> {
        let url = format!("{}/api/chat", self.base_url);

        let tool_defs: Vec<serde_json::Value> = tools
            .iter()
            .map(|schema| {
                json!({
                    "type": "function",
                    "function": {
                        "name": schema.name,
                        "description": schema.description,
                        "parameters": schema.parameters,
                    }
                })
            })
            .collect();

        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            tools: tool_defs,
            options,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ModelApi(format!("failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AgentError::ModelApi(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ModelApi(format!("malformed chat response: {}", e)))?;

        Ok(parsed.message)
    }

    /// Check that the Ollama server is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/version", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(2))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// List installed model names via GET /api/tags
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgentError::ModelApi(format!("failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgentError::ModelApi(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ModelApi(format!("malformed tags response: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
