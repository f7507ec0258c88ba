//! Error types for the Pixy agent system
//!
//! One top-level error enum with context propagation; the arithmetic
//! evaluator carries its own error taxonomy in `calc::CalcError` and is
//! surfaced here through `Calc`.

use thiserror::Error;

/// Main error type for the Pixy agent system
#[derive(Error, Debug)]
pub enum AgentError {
    /// Ollama API returned a non-success status or malformed payload
    #[error("Ollama API error: {0}")]
    ModelApi(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool dispatch errors (unknown tool, bad arguments, disabled tool)
    #[error("Tool error: {0}")]
    Tool(String),

    /// Arithmetic evaluation errors
    #[error("Calculation error: {0}")]
    Calc(#[from] crate::calc::CalcError),

    /// Generic errors with context
    #[error("Agent error: {0}")]
    Generic(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Convert anyhow errors to AgentError
impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Generic(err.to_string())
    }
}
