//! Wire grammar for FTCP negotiation and transfer channels.
//!
//! The negotiation channel carries line-oriented text datagrams; the transfer
//! channel carries raw bytes delimited by [`EOF_MARKER`] and closed by an
//! [`messages::Ack`]. Two grammar generations exist in the field for both
//! requests and replies; everything here parses both and encodes the current
//! generation.

pub mod error;
pub mod messages;

pub use error::ProtocolError;
pub use messages::{Ack, Grant, NegotiationReply, RejectReason, TransferRequest};

/// The single transport the negotiator will grant.
pub const TRANSPORT_TCP: &str = "TCP";

/// End-of-stream marker, sent as its own trailing write on the transfer channel.
pub const EOF_MARKER: &[u8] = b"<<EOF>>";

/// Acknowledgment token sent by the receiver once the marker is seen.
pub const ACK_TOKEN: &str = "FTCP_ACK";

/// Prefix carried by every negotiation error reply.
pub const ERROR_PREFIX: &str = "ERRO";

/// Keyword opening a current-generation request.
pub const REQUEST_KEYWORD: &str = "REQUEST";

/// Keyword opening a structured grant reply.
pub const RESPONSE_KEYWORD: &str = "RESPONSE";

/// Largest datagram either side sends or accepts on the negotiation channel.
pub const MAX_DATAGRAM: usize = 1024;
