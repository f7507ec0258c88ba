//! The calculate tool
//!
//! Wraps the arithmetic evaluator. This is the only computation tool the
//! model gets; there is no path that evaluates arbitrary code.

use crate::calc;
use crate::errors::Result;
use crate::tools::types::{Tool, ToolArgs, ToolContext, ToolSchema};
use async_trait::async_trait;
use serde_json::json;

pub struct CalculateTool;

#[async_trait]
impl Tool for CalculateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "calculate",
            "Calculates the result of a mathematical expression according to BODMAS \
             (Brackets, Orders, Division, Multiplication, Addition, Subtraction). \
             Supports +, -, *, /, parentheses, and exponents (**).",
            json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "The mathematical expression to calculate, e.g. '2 * (3 + 4) / 7' or '2 ** 3 + 1'."
                    }
                },
                "required": ["expression"]
            }),
        )
    }

    async fn execute(&self, args: &ToolArgs, _ctx: &ToolContext) -> Result<String> {
        let expression = args.required_str("expression")?;
        let value = calc::evaluate(expression)?;
        Ok(format_value(value))
    }
}

/// Render without a trailing `.0` for integral results
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
