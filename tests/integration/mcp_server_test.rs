use anyhow::Result;
use serde_json::json;
use std::path::Path;

use test_support::{fixtures::goo_tagged_suite, MCPTestClient};

fn goo_binary() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_goo"))
}

#[tokio::test]
async fn test_server_initialization() -> Result<()> {
    let client = MCPTestClient::start(goo_binary()).await?;
    let init_response = client.initialize().await?;

    // Check server info
    let server_info = &init_response["serverInfo"];
    assert_eq!(server_info["name"], "goo");
    assert!(server_info["version"].is_string());

    // Check capabilities
    assert!(init_response["capabilities"].get("tools").is_some());

    client.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_list_tools() -> Result<()> {
    let client = MCPTestClient::start(goo_binary()).await?;
    client.initialize().await?;

    let tools = client.list_tools().await?;
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "get_value");

    client.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_acceptance_suite_over_the_wire() -> Result<()> {
    let client = MCPTestClient::start(goo_binary()).await?;
    client.initialize().await?;

    // The harness is synchronous, so collect the server's answers first.
    let suite = goo_tagged_suite();
    let mut answers = Vec::new();
    for case in &suite.cases {
        answers.push(((case.a, case.b), client.get_value(case.a, case.b).await?));
    }

    let report = suite.run(|a, b| {
        answers
            .iter()
            .find(|(input, _)| *input == (a, b))
            .map(|(_, value)| *value)
            .expect("answer collected for every case")
    });
    report.assert_success();

    client.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_tool_errors_keep_server_alive() -> Result<()> {
    let client = MCPTestClient::start(goo_binary()).await?;
    client.initialize().await?;

    let response = client
        .request_raw(
            "tools/call",
            Some(json!({"name": "get_value", "arguments": {"a": "five", "b": 5}})),
        )
        .await?;
    assert_eq!(response["error"]["code"], -1);
    assert!(response["error"]["message"]
        .as_str()
        .unwrap()
        .contains("must be an integer"));

    let response = client.request_raw("does/not/exist", None).await?;
    assert_eq!(response["error"]["code"], -32601);

    // Garbage lines are skipped.
    client.write_line("{ definitely not json").await?;

    assert_eq!(client.get_value(5, -5).await?, 5);

    client.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn test_server_exits_cleanly_on_eof() -> Result<()> {
    let client = MCPTestClient::start(goo_binary()).await?;
    client.initialize().await?;
    assert_eq!(client.get_value(0, 0).await?, 0);

    let status = client.shutdown().await?;
    assert!(status.success(), "server exited with {}", status);
    Ok(())
}
