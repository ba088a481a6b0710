pub mod mcp;

pub use mcp::{
    error_codes, ContentItem, MCPError, MCPRequest, MCPResponse, ToolDefinition, ToolResult,
};
