//! Requester-side protocol driver.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tracing::{debug, info};

use ftcp_protocol::{Grant, MAX_DATAGRAM, NegotiationReply, TransferRequest};

use crate::NegotiationError;

/// Default bound on the wait for a negotiation reply.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Client-side driver for the full request/grant/fetch exchange.
pub struct Requester {
    server: SocketAddr,
    reply_timeout: Duration,
}

impl Requester {
    pub fn new(server: SocketAddr) -> Self {
        Self {
            server,
            reply_timeout: REPLY_TIMEOUT,
        }
    }

    /// Overrides the reply timeout.
    pub fn reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Sends the negotiation request and awaits the grant.
    ///
    /// A lost reply is bounded by the reply timeout rather than stalling the
    /// requester forever; `ERRO` replies surface as
    /// [`NegotiationError::Rejected`].
    pub async fn negotiate(&self, filename: &str) -> Result<Grant, NegotiationError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect(self.server).await?;

        let request = TransferRequest::new(filename);
        socket.send(request.encode().as_bytes()).await?;
        debug!(server = %self.server, filename, "negotiation request sent");

        let mut buf = [0u8; MAX_DATAGRAM];
        let n = tokio::time::timeout(self.reply_timeout, socket.recv(&mut buf))
            .await
            .map_err(|_| NegotiationError::ReplyTimeout(self.reply_timeout))??;

        let text = String::from_utf8_lossy(&buf[..n]);
        match NegotiationReply::parse(&text)? {
            NegotiationReply::Grant(grant) => {
                info!(port = grant.port, filename, "grant received");
                Ok(grant)
            }
            NegotiationReply::Error(reason) => Err(NegotiationError::Rejected(reason)),
        }
    }

    /// Full protocol: negotiate, then fetch the file bytes over TCP.
    ///
    /// The transfer connects to the granted port on the negotiator's host.
    /// Persisting the bytes is the caller's concern — nothing is written to
    /// disk here, so a failed transfer leaves no partial output behind.
    pub async fn request_file(&self, filename: &str) -> Result<Vec<u8>, NegotiationError> {
        let grant = self.negotiate(filename).await?;
        let addr = SocketAddr::new(self.server.ip(), grant.port);
        Ok(ftcp_transfer::client::fetch(addr).await?)
    }
}
