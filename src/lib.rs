//! Pixy - personal assistant agent for local Ollama models
//!
//! A small chat agent that forwards conversation to a locally hosted model,
//! executes the tools the model asks for (arithmetic, weather, time,
//! memory, contacts), and persists conversation state as JSON documents.
//!
//! # Architecture
//!
//! - `calc`: safe BODMAS expression evaluator, the only computation tool
//! - `chat`: Ollama /api/chat transport with tool advertising
//! - `tools`: schema registry and validated dispatch
//! - `store`: file-backed history, memory, and per-user data
//! - `agent`: the conversation loop tying the above together
//! - `cli` + `repl`: terminal surface

pub mod agent;
pub mod calc;
pub mod chat;
pub mod cli;
pub mod errors;
pub mod repl;
pub mod store;
pub mod tools;

// Re-export commonly used types
pub use errors::{AgentError, Result};
