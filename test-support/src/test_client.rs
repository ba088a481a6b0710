use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};
use std::{
    path::Path,
    process::{ExitStatus, Stdio},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    process::{Child, ChildStdin, ChildStdout, Command},
    sync::Mutex,
    time::timeout,
};

use crate::timeouts;

struct ClientIo {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// MCP test client for integration testing. Spawns the server binary and
/// talks line-delimited JSON-RPC to it over its stdio.
pub struct MCPTestClient {
    process: Mutex<Option<Child>>,
    /// Held across a whole request/response exchange so concurrent callers
    /// never read each other's responses. `None` once stdin is closed.
    io: Mutex<Option<ClientIo>>,
    request_id: AtomicU64,
}

impl MCPTestClient {
    /// Start the server binary at `binary` with no arguments.
    pub async fn start(binary: &Path) -> Result<Self> {
        let mut process = Command::new(binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("RUST_LOG", "debug")
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {}", binary.display()))?;

        let stdin = process.stdin.take().context("Child stdin not captured")?;
        let stdout = BufReader::new(process.stdout.take().context("Child stdout not captured")?);
        let stderr = process.stderr.take().context("Child stderr not captured")?;

        // Spawn a task to consume stderr and forward the server's logs
        tokio::spawn(async move {
            let mut stderr_reader = BufReader::new(stderr);
            let mut line = String::new();
            while let Ok(n) = stderr_reader.read_line(&mut line).await {
                if n == 0 {
                    break;
                }
                if !line.trim().is_empty() {
                    eprintln!("[goo stderr] {}", line.trim());
                }
                line.clear();
            }
        });

        Ok(Self {
            process: Mutex::new(Some(process)),
            io: Mutex::new(Some(ClientIo { stdin, stdout })),
            request_id: AtomicU64::new(1),
        })
    }

    /// Write a raw line to the server without waiting for a response.
    pub async fn write_line(&self, line: &str) -> Result<()> {
        let mut io = self.io.lock().await;
        let io = io.as_mut().ok_or_else(|| anyhow!("Client is shut down"))?;
        io.stdin.write_all(line.as_bytes()).await?;
        io.stdin.write_all(b"\n").await?;
        io.stdin.flush().await?;
        Ok(())
    }

    /// Send a notification (no id, no response).
    pub async fn notify(&self, method: &str) -> Result<()> {
        let notification = json!({
            "jsonrpc": "2.0",
            "method": method
        });
        self.write_line(&serde_json::to_string(&notification)?).await
    }

    /// Send a request and return the whole response envelope.
    pub async fn request_raw(&self, method: &str, params: Option<Value>) -> Result<Value> {
        self.request_raw_with_timeout(method, params, timeouts::request())
            .await
    }

    pub async fn request_raw_with_timeout(
        &self,
        method: &str,
        params: Option<Value>,
        timeout_duration: Duration,
    ) -> Result<Value> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let mut request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method
        });

        if let Some(params) = params {
            request["params"] = params;
        }

        let request_str = serde_json::to_string(&request)?;

        let mut io = self.io.lock().await;
        let io = io.as_mut().ok_or_else(|| anyhow!("Client is shut down"))?;

        io.stdin.write_all(request_str.as_bytes()).await?;
        io.stdin.write_all(b"\n").await?;
        io.stdin.flush().await?;

        // Read response with timeout
        let response_line = timeout(timeout_duration, async {
            let mut line = String::new();
            let n = io.stdout.read_line(&mut line).await?;
            if n == 0 {
                return Err(anyhow!("Server closed stdout"));
            }
            Ok::<String, anyhow::Error>(line)
        })
        .await
        .map_err(|_| anyhow!("Request timeout after {:?}", timeout_duration))??;

        let response: Value = serde_json::from_str(&response_line)
            .with_context(|| format!("Invalid response line: {}", response_line.trim()))?;

        if response["id"] != json!(id) {
            return Err(anyhow!(
                "Response id {} does not match request id {}",
                response["id"],
                id
            ));
        }

        Ok(response)
    }

    /// Send a request and return its result, turning JSON-RPC errors into `Err`.
    pub async fn send_request(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let response = self.request_raw(method, params).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("MCP error: {}", error));
        }

        Ok(response.get("result").cloned().unwrap_or(json!(null)))
    }

    /// Initialize the MCP server
    pub async fn initialize(&self) -> Result<Value> {
        let result = self
            .send_request(
                "initialize",
                Some(json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {
                        "name": "test-client",
                        "version": "1.0.0"
                    }
                })),
            )
            .await?;
        self.notify("notifications/initialized").await?;
        Ok(result)
    }

    pub async fn list_tools(&self) -> Result<Vec<Value>> {
        let result = self.send_request("tools/list", None).await?;
        result["tools"]
            .as_array()
            .cloned()
            .ok_or_else(|| anyhow!("tools/list returned no tools array: {}", result))
    }

    /// Call a tool
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<Value> {
        self.send_request(
            "tools/call",
            Some(json!({
                "name": name,
                "arguments": arguments
            })),
        )
        .await
    }

    /// Call the `get_value` tool and parse its text result.
    pub async fn get_value(&self, a: i32, b: i32) -> Result<i64> {
        let result = self.call_tool("get_value", json!({"a": a, "b": b})).await?;
        let Some(text) = result["content"][0]["text"].as_str() else {
            return Err(anyhow!("get_value returned no text content: {}", result));
        };
        text.parse()
            .with_context(|| format!("get_value returned a non-integer: {}", text))
    }

    /// Close stdin and wait for the server to exit on EOF.
    pub async fn shutdown(&self) -> Result<ExitStatus> {
        // Dropping stdin signals EOF to the server.
        self.io.lock().await.take();

        let mut process = self.process.lock().await;
        let Some(child) = process.as_mut() else {
            return Err(anyhow!("Process already reaped"));
        };

        let waited = timeout(timeouts::shutdown(), child.wait()).await;
        let status = match waited {
            Ok(status) => status?,
            Err(_) => {
                child.kill().await?;
                return Err(anyhow!(
                    "Server did not exit within {:?} of stdin closing",
                    timeouts::shutdown()
                ));
            }
        };
        process.take();
        Ok(status)
    }
}
