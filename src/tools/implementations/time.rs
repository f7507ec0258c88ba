//! The get_current_time tool
//!
//! Current time for a known city by a fixed city-to-UTC-offset table, or
//! the local timezone when no location is given. The table carries no DST
//! rules; offsets are the cities' standard time.

use crate::errors::{AgentError, Result};
use crate::tools::types::{Tool, ToolArgs, ToolContext, ToolSchema};
use async_trait::async_trait;
use chrono::{FixedOffset, Local, Utc};
use serde_json::json;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// City name to UTC offset in seconds east
const CITY_OFFSETS: &[(&str, i32)] = &[
    ("New York", -5 * 3600),
    ("Los Angeles", -8 * 3600),
    ("Chicago", -6 * 3600),
    ("Delhi", 5 * 3600 + 1800),
    ("Mumbai", 5 * 3600 + 1800),
    ("Bangalore", 5 * 3600 + 1800),
    ("Chennai", 5 * 3600 + 1800),
    ("Hyderabad", 5 * 3600 + 1800),
    ("Kolkata", 5 * 3600 + 1800),
    ("Pune", 5 * 3600 + 1800),
    ("Beijing", 8 * 3600),
    ("Shanghai", 8 * 3600),
    ("London", 0),
    ("Paris", 3600),
    ("Berlin", 3600),
    ("Rome", 3600),
    ("Madrid", 3600),
    ("Amsterdam", 3600),
    ("Stockholm", 3600),
    ("Tokyo", 9 * 3600),
];

fn offset_for(city: &str) -> Option<i32> {
    CITY_OFFSETS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(city))
        .map(|(_, offset)| *offset)
}

pub struct TimeTool;

impl TimeTool {
    /// Formatted current time for a city, or local time for None
    pub fn current_time(location: Option<&str>) -> Result<String> {
        match location {
            Some(city) => {
                let seconds = offset_for(city).ok_or_else(|| {
                    AgentError::Tool(format!("unknown location '{}'", city))
                })?;
                // offsets in the table are all within +-14h, east_opt cannot fail
                let offset = FixedOffset::east_opt(seconds)
                    .ok_or_else(|| AgentError::Tool("invalid timezone offset".to_string()))?;
                Ok(Utc::now().with_timezone(&offset).format(TIME_FORMAT).to_string())
            }
            None => Ok(Local::now().format(TIME_FORMAT).to_string()),
        }
    }
}

#[async_trait]
impl Tool for TimeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "get_current_time",
            "Get the current time in a specified city. Without a location, \
             returns the current time in the user's local timezone.",
            json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "City name to get the current time for, e.g. 'Tokyo'."
                    }
                },
                "required": []
            }),
        )
    }

    async fn execute(&self, args: &ToolArgs, _ctx: &ToolContext) -> Result<String> {
        Self::current_time(args.optional_str("location"))
    }
}
