//! Error types for the negotiation channel.

use std::time::Duration;

/// Errors produced during negotiation, on either side.
#[derive(Debug, thiserror::Error)]
pub enum NegotiationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no negotiation reply within {0:?}")]
    ReplyTimeout(Duration),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("protocol error: {0}")]
    Protocol(#[from] ftcp_protocol::ProtocolError),

    #[error(transparent)]
    Transfer(#[from] ftcp_transfer::TransferError),
}
