//! Transfer fetch (client side).
//!
//! Connects to a granted transfer port, drains bytes until the end-of-stream
//! marker, and acknowledges with the received byte count.

use std::net::SocketAddr;
use std::time::Duration;

use ftcp_protocol::Ack;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::wire::{read_until_eof, write_ack};
use crate::{ACK_LINGER, CONNECT_ATTEMPTS, CONNECT_BACKOFF, TransferError};

/// Connects to a granted transfer port and drains the file.
///
/// The grant can arrive before the worker's listener is bound, so the connect
/// is retried with a short backoff. After the marker is seen the accumulated
/// bytes are acknowledged with their count, and the connection lingers
/// briefly so the peer can read the acknowledgment before teardown.
pub async fn fetch(addr: SocketAddr) -> Result<Vec<u8>, TransferError> {
    let mut stream = connect_with_backoff(addr).await?;
    info!(%addr, "transfer connection established");

    let data = read_until_eof(&mut stream).await?;
    debug!(bytes = data.len(), "end-of-stream marker seen");

    write_ack(&mut stream, &Ack::with_count(data.len() as u64)).await?;
    tokio::time::sleep(ACK_LINGER).await;

    Ok(data)
}

/// Retries the connect until the worker's listener is up.
async fn connect_with_backoff(addr: SocketAddr) -> Result<TcpStream, TransferError> {
    let mut backoff = CONNECT_BACKOFF;
    for attempt in 1..CONNECT_ATTEMPTS {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, attempt, error = %e, "transfer connect failed, retrying");
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2).min(Duration::from_secs(1));
            }
        }
    }
    match TcpStream::connect(addr).await {
        Ok(stream) => Ok(stream),
        Err(_) => Err(TransferError::ConnectFailed {
            attempts: CONNECT_ATTEMPTS,
        }),
    }
}
