//! Negotiation server: the request state machine and its UDP receive loop.

use std::path::PathBuf;

use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ftcp_protocol::{MAX_DATAGRAM, NegotiationReply, RejectReason, TransferRequest};
use ftcp_transfer::TransferWorker;

use crate::NegotiationError;
use crate::catalog::Catalog;
use crate::pool::PortPool;

/// A grant the negotiation loop must act on: spawn a worker on `port`
/// serving `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantedSession {
    pub port: u16,
    pub source: PathBuf,
}

/// Negotiation state machine: the catalog plus the port cursor.
///
/// Purely reactive — one datagram in, one reply out. The cursor is owned by
/// the single receive loop and mutated nowhere else, so no synchronization
/// is needed.
pub struct Negotiator {
    catalog: Catalog,
    pool: PortPool,
}

impl Negotiator {
    pub fn new(catalog: Catalog, pool: PortPool) -> Self {
        Self { catalog, pool }
    }

    /// Handles one raw request datagram.
    ///
    /// Validation order: grammar, catalog, transport, pool. Each failure is
    /// terminal for the request and leaves the pool untouched.
    pub fn handle_request(&mut self, raw: &[u8]) -> (NegotiationReply, Option<GrantedSession>) {
        let text = String::from_utf8_lossy(raw);
        let request = match TransferRequest::parse(&text) {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "rejecting malformed request");
                return (
                    NegotiationReply::reject(RejectReason::MalformedRequest),
                    None,
                );
            }
        };

        let Some(source) = self.catalog.resolve(&request.filename) else {
            debug!(filename = %request.filename, "rejecting request for unknown file");
            return (NegotiationReply::reject(RejectReason::FileNotFound), None);
        };
        let source = source.to_path_buf();

        if !request.is_supported_transport() {
            debug!(transport = %request.transport, "rejecting unsupported transport");
            return (
                NegotiationReply::reject(RejectReason::UnsupportedTransport),
                None,
            );
        }

        let Some(port) = self.pool.allocate() else {
            warn!("transfer port pool exhausted");
            return (NegotiationReply::reject(RejectReason::NoPortsAvailable), None);
        };

        (
            NegotiationReply::grant(port, &request.filename),
            Some(GrantedSession { port, source }),
        )
    }

    /// Runs the receive loop on `socket` until `cancel` fires.
    ///
    /// Each grant spawns a detached transfer worker before the reply datagram
    /// goes out; the loop never waits on a worker, and a failed session is
    /// logged without affecting the loop or other sessions.
    pub async fn run(
        mut self,
        socket: UdpSocket,
        cancel: CancellationToken,
    ) -> Result<(), NegotiationError> {
        let mut buf = [0u8; MAX_DATAGRAM];
        info!(addr = %socket.local_addr()?, "negotiator listening");
        loop {
            let (n, sender) = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("negotiator shutting down");
                    return Ok(());
                }
                result = socket.recv_from(&mut buf) => result?,
            };

            let (reply, grant) = self.handle_request(&buf[..n]);

            if let Some(session) = grant {
                let port = session.port;
                info!(
                    port,
                    source = %session.source.display(),
                    %sender,
                    "granting transfer"
                );
                tokio::spawn(async move {
                    let worker = TransferWorker::new(port, session.source);
                    if let Err(e) = worker.run().await {
                        warn!(port, error = %e, "transfer session failed");
                    }
                });
            }

            let encoded = reply.encode();
            debug!(%sender, reply = %encoded, "sending negotiation reply");
            socket.send_to(encoded.as_bytes(), sender).await?;
        }
    }
}
