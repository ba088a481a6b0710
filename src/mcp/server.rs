use anyhow::Result;
use log::{debug, error, info};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::{
    config::{MCP_PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION},
    protocol::mcp::{error_codes, MCPRequest, MCPResponse},
};

/// Line-delimited JSON-RPC server exposing the goo value function as a tool.
#[derive(Debug, Default)]
pub struct GooMCPServer {
    requests_served: u64,
}

impl GooMCPServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests answered so far.
    pub fn requests_served(&self) -> u64 {
        self.requests_served
    }

    /// Serve on stdin/stdout until EOF or Ctrl-C.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting goo MCP server");

        let reader = BufReader::new(tokio::io::stdin());
        let writer = BufWriter::new(tokio::io::stdout());

        let result = tokio::select! {
            result = self.serve(reader, writer) => result,
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                Ok(())
            }
        };

        info!("Shutting down after {} request(s)", self.requests_served);
        result
    }

    /// Serve requests read from `reader`, writing one response line per
    /// request to `writer`, until `reader` reaches EOF.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let bytes_read = match reader.read_until(b'\n', &mut buf).await {
                Ok(n) => n,
                Err(e) => {
                    error!("Error reading request: {}", e);
                    break;
                }
            };

            if bytes_read == 0 {
                break; // EOF
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                debug!("Skipping line that is not valid UTF-8 ({} bytes)", bytes_read);
                continue;
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let Ok(request) = serde_json::from_str::<MCPRequest>(trimmed) else {
                debug!("Failed to parse request: {}", trimmed);
                continue;
            };

            debug!("Received request: {}", request.method);
            let Some(response) = self.handle_request(request) else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Answer a single request. Notifications yield `None`.
    pub fn handle_request(&mut self, request: MCPRequest) -> Option<MCPResponse> {
        if request.is_notification() {
            debug!("Ignoring notification: {}", request.method);
            return None;
        }
        self.requests_served += 1;

        let response = match request.method.as_str() {
            "initialize" => MCPResponse::success(
                request.id,
                json!({
                    "protocolVersion": MCP_PROTOCOL_VERSION,
                    "serverInfo": {
                        "name": SERVER_NAME,
                        "version": SERVER_VERSION
                    },
                    "capabilities": {
                        "tools": {}
                    }
                }),
            ),
            "ping" => MCPResponse::success(request.id, json!({})),
            "tools/list" => MCPResponse::success(
                request.id,
                json!({
                    "tools": super::tools::get_tools()
                }),
            ),
            "tools/call" => {
                let Some(params) = request.params else {
                    return Some(MCPResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        "Invalid params",
                    ));
                };

                let Some(tool_name) = params["name"].as_str() else {
                    return Some(MCPResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        "Missing tool name",
                    ));
                };

                let args = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| json!({}));

                match super::handlers::handle_tool_call(tool_name, args)
                    .and_then(|result| Ok(serde_json::to_value(result)?))
                {
                    Ok(result) => MCPResponse::success(request.id, result),
                    Err(e) => {
                        error!("Tool call error: {}", e);
                        MCPResponse::error(request.id, error_codes::TOOL_ERROR, e.to_string())
                    }
                }
            }
            _ => MCPResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }
}
