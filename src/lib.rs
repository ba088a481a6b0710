pub mod config;
pub mod mcp;
pub mod protocol;
pub mod value;

pub use mcp::GooMCPServer;
pub use value::{get_value, AcceptanceRow, ACCEPTANCE_TABLE};
