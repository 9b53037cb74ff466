//! FTCP one-shot client entry point.
//!
//! Usage: `ftcp-get <filename> [server]`, where `server` defaults to
//! `127.0.0.1:4500`. The received bytes are written to
//! `received_<basename>` only once the transfer completed; a refused or
//! truncated transfer leaves no partial file behind.

use std::net::SocketAddr;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use ftcp_negotiator::Requester;

const DEFAULT_SERVER: &str = "127.0.0.1:4500";

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(filename) = args.next() else {
        anyhow::bail!("usage: ftcp-get <filename> [server]");
    };
    let server: SocketAddr = args
        .next()
        .unwrap_or_else(|| DEFAULT_SERVER.to_string())
        .parse()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(server, &filename))
}

async fn run(server: SocketAddr, filename: &str) -> anyhow::Result<()> {
    let data = Requester::new(server).request_file(filename).await?;

    // Persist under the basename so the output stays in the working directory.
    let basename = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    let output = format!("received_{basename}");
    std::fs::write(&output, &data)?;

    tracing::info!(bytes = data.len(), output = %output, "file received");
    println!("saved {} bytes to {output}", data.len());
    Ok(())
}
