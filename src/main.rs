use anyhow::{anyhow, Context, Result};

use goo::{config, get_value, GooMCPServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging. Logs go to stderr so stdout stays protocol-clean.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::DEFAULT_LOG_FILTER),
    )
    .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // No operands: serve the tool over stdio.
    if args.is_empty() {
        let mut server = GooMCPServer::new();
        return server.run().await;
    }

    let [a, b] = args.as_slice() else {
        return Err(anyhow!(
            "Expected two integer operands, got {} argument(s). Usage: goo [<a> <b>]",
            args.len()
        ));
    };

    let a = parse_operand("a", a)?;
    let b = parse_operand("b", b)?;
    println!("{}", get_value(a, b));

    Ok(())
}

fn parse_operand(name: &str, raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .with_context(|| format!("Invalid operand {}: {:?}", name, raw))
}
