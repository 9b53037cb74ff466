//! TCP transfer channel for FTCP.
//!
//! After a grant, one [`server::TransferWorker`] owns the granted port: it
//! accepts a single connection, streams the source file in bounded chunks,
//! terminates the stream with the `<<EOF>>` marker, and waits a bounded
//! interval for the acknowledgment. The client side ([`client::fetch`])
//! drains the stream, strips the marker, and acknowledges with the received
//! byte count.
//!
//! # Wire format
//!
//! See [`wire`] for the framing rules.

pub mod client;
pub mod error;
pub mod server;
pub mod wire;

pub use error::TransferError;
pub use server::{SessionSummary, TransferWorker};

use std::time::Duration;

/// Read/write chunk size for file streaming (1 KiB).
pub const CHUNK_SIZE: usize = 1024;

/// How long a worker waits for its single peer to connect.
pub const ACCEPT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a worker waits for the acknowledgment after the marker.
pub const ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum connect attempts against a granted port whose listener may not
/// be bound yet.
pub const CONNECT_ATTEMPTS: u32 = 10;

/// Initial backoff between connect attempts.
pub const CONNECT_BACKOFF: Duration = Duration::from_millis(100);

/// How long the client keeps the connection open after the acknowledgment,
/// so the peer can read it before teardown.
pub const ACK_LINGER: Duration = Duration::from_millis(200);
