//! Error types for the wire grammar.

/// Errors produced while parsing FTCP wire messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("malformed reply: {0}")]
    MalformedReply(String),

    #[error("malformed acknowledgment: {0}")]
    MalformedAck(String),

    #[error("invalid port number: {0}")]
    InvalidPort(String),
}
