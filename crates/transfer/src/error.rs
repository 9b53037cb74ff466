//! Error types for the transfer channel.

use std::path::PathBuf;

/// Errors produced on the transfer channel.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ftcp_protocol::ProtocolError),

    #[error("no peer connected before the accept deadline")]
    AcceptTimeout,

    #[error("could not connect to transfer port after {attempts} attempts")]
    ConnectFailed { attempts: u32 },

    #[error("connection closed after {received} bytes without end-of-stream marker")]
    Truncated { received: u64 },

    #[error("cannot open source file {path}: {source}")]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },
}
