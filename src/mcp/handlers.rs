use anyhow::{anyhow, Result};
use log::debug;
use serde_json::Value;

use crate::{protocol::mcp::ToolResult, value::get_value};

use super::tools::GET_VALUE_TOOL;

/// Helper struct for extracting tool parameters.
struct ToolParams;

impl ToolParams {
    fn extract_operand(args: &Value, name: &str) -> Result<i32> {
        let Some(raw) = args.get(name) else {
            return Err(anyhow!("Missing {}", name));
        };
        let Some(value) = raw.as_i64() else {
            // Integers above i64::MAX only fit in u64.
            if raw.is_u64() {
                return Err(anyhow!("Operand {} out of range: {}", name, raw));
            }
            return Err(anyhow!("Operand {} must be an integer, got {}", name, raw));
        };
        i32::try_from(value).map_err(|_| anyhow!("Operand {} out of range: {}", name, value))
    }
}

pub fn handle_tool_call(tool_name: &str, args: Value) -> Result<ToolResult> {
    match tool_name {
        GET_VALUE_TOOL => handle_get_value(args),
        _ => Err(anyhow!("Unknown tool: {}", tool_name)),
    }
}

fn handle_get_value(args: Value) -> Result<ToolResult> {
    let a = ToolParams::extract_operand(&args, "a")?;
    let b = ToolParams::extract_operand(&args, "b")?;

    let result = get_value(a, b);
    debug!("get_value({}, {}) = {}", a, b, result);

    Ok(ToolResult::text(result.to_string()))
}
