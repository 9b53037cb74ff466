//! FTCP server daemon entry point.

mod config;

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use ftcp_negotiator::{Catalog, Negotiator, PortPool};

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting ftcpd");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ftcpd.toml".to_string());
    let config = config::ServerConfig::load(Path::new(&config_path))?;
    tracing::info!(
        negotiation_port = config.negotiation_port,
        transfer_port_start = config.transfer_port_start,
        transfer_port_end = config.transfer_port_end,
        files = config.files.len(),
        "configuration loaded"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))?;

    tracing::info!("ftcpd shut down cleanly");
    Ok(())
}

async fn run(config: config::ServerConfig) -> anyhow::Result<()> {
    let catalog = Catalog::from_paths(config.files);
    let pool = PortPool::new(config.transfer_port_start, config.transfer_port_end);
    let socket = tokio::net::UdpSocket::bind(("0.0.0.0", config.negotiation_port)).await?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received");
            interrupt.cancel();
        }
    });

    Negotiator::new(catalog, pool).run(socket, cancel).await?;
    Ok(())
}
