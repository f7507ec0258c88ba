//! Ollama chat transport
//!
//! Role-tagged messages in and out of the local model, with tool schemas
//! advertised on each request. Non-streaming: one request, one response.

pub mod client;
pub mod types;

pub use client::ChatClient;
pub use types::{ChatMessage, ChatOptions, Role, ToolCall, ToolCallFunction};
