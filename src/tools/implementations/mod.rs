//! Built-in tool implementations

pub mod calculate;
pub mod memory_tools;
pub mod time;
pub mod weather;

pub use calculate::CalculateTool;
pub use memory_tools::{StoreContactTool, StoreMemoryTool, StoreUserInfoTool, UpdateContactTool};
pub use time::TimeTool;
pub use weather::WeatherTool;
