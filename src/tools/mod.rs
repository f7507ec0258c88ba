//! Tool runtime: schemas, registry, validated dispatch
//!
//! A tool is a named, schema-described function the model may request be
//! invoked. The registry maps names to boxed handlers; the executor
//! validates the model-supplied argument record against the tool's JSON
//! schema before dispatch, so a missing required key is rejected up front
//! instead of failing inside the handler.

pub mod cache;
pub mod executor;
pub mod implementations;
pub mod registry;
pub mod types;

pub use cache::{Clock, SystemClock, TtlCache};
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use types::{Tool, ToolArgs, ToolContext, ToolResult, ToolSchema};
