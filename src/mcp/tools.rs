use crate::protocol::mcp::ToolDefinition;
use serde_json::json;

/// Name of the only tool the server exposes.
pub const GET_VALUE_TOOL: &str = "get_value";

pub fn get_tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: GET_VALUE_TOOL.to_string(),
        description: "Compute the goo value of two 32-bit signed integers".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "integer",
                    "description": "First operand",
                    "minimum": i32::MIN,
                    "maximum": i32::MAX
                },
                "b": {
                    "type": "integer",
                    "description": "Second operand",
                    "minimum": i32::MIN,
                    "maximum": i32::MAX
                }
            },
            "required": ["a", "b"]
        }),
    }]
}
