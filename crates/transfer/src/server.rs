//! Transfer worker (server side).
//!
//! One worker per grant: it binds the granted port with address reuse and a
//! backlog of one, accepts a single peer, streams the source file in bounded
//! chunks, emits the end-of-stream marker, and waits a bounded interval for
//! the acknowledgment. Every failure is local to the session, and both the
//! listener and the accepted connection are released on all exit paths.

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket};
use tracing::{debug, info, warn};

use ftcp_protocol::ERROR_PREFIX;

use crate::wire::{read_ack, write_eof_marker};
use crate::{ACCEPT_TIMEOUT, ACK_TIMEOUT, CHUNK_SIZE, TransferError};

/// Outcome of a completed transfer session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub peer: SocketAddr,
    pub bytes_sent: u64,
    /// Byte count carried by the acknowledgment, when one arrived with a count.
    pub acked_bytes: Option<u64>,
}

/// One transfer session bound to one granted port.
pub struct TransferWorker {
    port: u16,
    source: PathBuf,
}

impl TransferWorker {
    pub fn new(port: u16, source: PathBuf) -> Self {
        Self { port, source }
    }

    /// Runs the session to completion.
    ///
    /// Exactly one peer is accepted. If the source file cannot be opened, a
    /// textual error payload is sent in lieu of data and the session ends
    /// without the end-of-stream marker. ACK timeout, malformed ACK, and a
    /// byte-count mismatch are logged, never fatal.
    pub async fn run(self) -> Result<SessionSummary, TransferError> {
        let listener = self.bind()?;
        info!(
            port = self.port,
            source = %self.source.display(),
            "transfer worker listening"
        );

        let (mut stream, peer) =
            match tokio::time::timeout(ACCEPT_TIMEOUT, listener.accept()).await {
                Ok(Ok(pair)) => pair,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => return Err(TransferError::AcceptTimeout),
            };
        // Only one requester per grant.
        drop(listener);
        debug!(port = self.port, %peer, "transfer connection accepted");

        let mut file = match tokio::fs::File::open(&self.source).await {
            Ok(f) => f,
            Err(e) => {
                // Error payload in lieu of data; no end-of-stream marker.
                let payload = format!(
                    "{ERROR_PREFIX},cannot open {}: {e}",
                    self.source.display()
                );
                let _ = stream.write_all(payload.as_bytes()).await;
                return Err(TransferError::Source {
                    path: self.source,
                    source: e,
                });
            }
        };

        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut bytes_sent: u64 = 0;
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            stream.write_all(&buf[..n]).await?;
            bytes_sent += n as u64;
        }

        write_eof_marker(&mut stream).await?;
        debug!(
            port = self.port,
            bytes_sent, "file streamed, waiting for acknowledgment"
        );

        let acked_bytes = match tokio::time::timeout(ACK_TIMEOUT, read_ack(&mut stream)).await {
            Ok(Ok(ack)) => {
                if let Some(count) = ack.bytes {
                    if count != bytes_sent {
                        warn!(
                            port = self.port,
                            sent = bytes_sent,
                            acked = count,
                            "acknowledged byte count does not match bytes sent"
                        );
                    }
                }
                ack.bytes
            }
            Ok(Err(e)) => {
                warn!(port = self.port, error = %e, "malformed acknowledgment");
                None
            }
            Err(_) => {
                warn!(port = self.port, "timed out waiting for acknowledgment");
                None
            }
        };

        info!(port = self.port, %peer, bytes_sent, "transfer session complete");
        Ok(SessionSummary {
            peer,
            bytes_sent,
            acked_bytes,
        })
    }

    /// Binds the granted port with address reuse and a backlog of one.
    ///
    /// Address reuse keeps a rapidly restarted worker on the same port from
    /// failing to bind while the previous socket lingers in TIME_WAIT.
    fn bind(&self) -> Result<TcpListener, TransferError> {
        let socket = TcpSocket::new_v4()?;
        socket.set_reuseaddr(true)?;
        socket.bind(SocketAddr::from(([0, 0, 0, 0], self.port)))?;
        Ok(socket.listen(1)?)
    }
}
