//! Server configuration.
//!
//! Read once at startup from a TOML file (default `ftcpd.toml`) and immutable
//! thereafter:
//!
//! ```toml
//! negotiation_port = 4500
//! transfer_port_start = 5000
//! transfer_port_end = 5049
//! files = ["/srv/files/a.txt", "/srv/files/b.txt"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// UDP port of the negotiation channel.
    #[serde(default = "default_negotiation_port")]
    pub negotiation_port: u16,

    /// First TCP transfer port (inclusive).
    #[serde(default = "default_transfer_port_start")]
    pub transfer_port_start: u16,

    /// Last TCP transfer port (inclusive).
    #[serde(default = "default_transfer_port_end")]
    pub transfer_port_end: u16,

    /// Storage paths of the served files; requesters name them by basename.
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

fn default_negotiation_port() -> u16 {
    4500
}

fn default_transfer_port_start() -> u16 {
    5000
}

fn default_transfer_port_end() -> u16 {
    5049
}

impl ServerConfig {
    /// Loads and validates the configuration from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.transfer_port_start > self.transfer_port_end {
            anyhow::bail!(
                "transfer_port_start {} is beyond transfer_port_end {}",
                self.transfer_port_start,
                self.transfer_port_end
            );
        }
        if self.files.is_empty() {
            anyhow::bail!("no files configured to serve");
        }
        Ok(())
    }
}
