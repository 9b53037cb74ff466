//! Negotiation and acknowledgment messages.
//!
//! Request generations:
//! - current: `REQUEST <filename> <transport>` (three space-delimited tokens)
//! - legacy:  `<filename>,<transport>`
//!
//! Reply generations:
//! - structured: `RESPONSE,<transport>,<port>,<filename>`
//! - legacy:     a bare decimal port
//! - error:      `ERRO` with an optional `,`/`:`-separated reason
//!
//! Both generations of each message parse; `encode` always emits the current
//! generation.

use std::fmt;

use crate::error::ProtocolError;
use crate::{ACK_TOKEN, ERROR_PREFIX, REQUEST_KEYWORD, RESPONSE_KEYWORD, TRANSPORT_TCP};

// ---------------------------------------------------------------------------
// TransferRequest
// ---------------------------------------------------------------------------

/// A negotiation request: which file, over which transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub filename: String,
    pub transport: String,
}

impl TransferRequest {
    /// Creates a request for `filename` over the supported transport.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            transport: TRANSPORT_TCP.to_string(),
        }
    }

    /// Parses either request generation.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&REQUEST_KEYWORD) {
            if tokens.len() != 3 {
                return Err(ProtocolError::MalformedRequest(format!(
                    "expected 3 tokens, got {}",
                    tokens.len()
                )));
            }
            return Ok(Self {
                filename: tokens[1].to_string(),
                transport: tokens[2].to_string(),
            });
        }

        // Legacy generation: `<filename>,<transport>`.
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 2 {
            return Err(ProtocolError::MalformedRequest(line.to_string()));
        }
        let filename = parts[0].trim();
        let transport = parts[1].trim();
        if filename.is_empty() || transport.is_empty() {
            return Err(ProtocolError::MalformedRequest(line.to_string()));
        }
        Ok(Self {
            filename: filename.to_string(),
            transport: transport.to_string(),
        })
    }

    /// True when the requested transport is the supported one (case-insensitive).
    pub fn is_supported_transport(&self) -> bool {
        self.transport.eq_ignore_ascii_case(TRANSPORT_TCP)
    }

    /// Encodes in the current generation.
    pub fn encode(&self) -> String {
        format!("{REQUEST_KEYWORD} {} {}", self.filename, self.transport)
    }
}

// ---------------------------------------------------------------------------
// RejectReason
// ---------------------------------------------------------------------------

/// Canonical rejection reasons carried in `ERRO` replies.
///
/// The wire text is stable; legacy clients display it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MalformedRequest,
    FileNotFound,
    UnsupportedTransport,
    NoPortsAvailable,
}

impl RejectReason {
    /// Stable wire text for this reason.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRequest => "malformed request",
            Self::FileNotFound => "file not found",
            Self::UnsupportedTransport => "unsupported transport",
            Self::NoPortsAvailable => "no ports available",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NegotiationReply
// ---------------------------------------------------------------------------

/// A successful negotiation reply: the allocated transfer port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub transport: String,
    pub port: u16,
    /// Echoed filename; absent in legacy bare-port replies.
    pub filename: Option<String>,
}

/// Reply to a negotiation request: a grant or a textual error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NegotiationReply {
    Grant(Grant),
    Error(String),
}

impl NegotiationReply {
    /// Creates a grant reply for `port`, echoing `filename`.
    pub fn grant(port: u16, filename: impl Into<String>) -> Self {
        Self::Grant(Grant {
            transport: TRANSPORT_TCP.to_string(),
            port,
            filename: Some(filename.into()),
        })
    }

    /// Creates an error reply for a canonical rejection reason.
    pub fn reject(reason: RejectReason) -> Self {
        Self::Error(reason.as_str().to_string())
    }

    /// Parses either reply generation.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(ERROR_PREFIX) {
            let reason = rest.trim_start_matches([',', ':']).trim();
            return Ok(Self::Error(reason.to_string()));
        }

        if line.starts_with(RESPONSE_KEYWORD) {
            let parts: Vec<&str> = line.split(',').collect();
            if parts.len() != 4 || parts[0] != RESPONSE_KEYWORD {
                return Err(ProtocolError::MalformedReply(line.to_string()));
            }
            let port = parts[2]
                .trim()
                .parse::<u16>()
                .map_err(|_| ProtocolError::InvalidPort(parts[2].trim().to_string()))?;
            return Ok(Self::Grant(Grant {
                transport: parts[1].trim().to_string(),
                port,
                filename: Some(parts[3].trim().to_string()),
            }));
        }

        // Legacy generation: a bare decimal port.
        let port = line
            .parse::<u16>()
            .map_err(|_| ProtocolError::MalformedReply(line.to_string()))?;
        Ok(Self::Grant(Grant {
            transport: TRANSPORT_TCP.to_string(),
            port,
            filename: None,
        }))
    }

    /// Encodes in the current generation.
    pub fn encode(&self) -> String {
        match self {
            Self::Grant(g) => format!(
                "{RESPONSE_KEYWORD},{},{},{}",
                g.transport,
                g.port,
                g.filename.as_deref().unwrap_or_default()
            ),
            Self::Error(reason) if reason.is_empty() => ERROR_PREFIX.to_string(),
            Self::Error(reason) => format!("{ERROR_PREFIX},{reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Ack
// ---------------------------------------------------------------------------

/// Delivery acknowledgment, optionally carrying the received byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub bytes: Option<u64>,
}

impl Ack {
    /// Creates an acknowledgment carrying a byte count.
    pub fn with_count(bytes: u64) -> Self {
        Self { bytes: Some(bytes) }
    }

    /// Parses `FTCP_ACK` or `FTCP_ACK,<decimal count>`.
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(ACK_TOKEN) else {
            return Err(ProtocolError::MalformedAck(line.to_string()));
        };
        if rest.is_empty() {
            return Ok(Self { bytes: None });
        }
        let Some(count) = rest.strip_prefix(',') else {
            return Err(ProtocolError::MalformedAck(line.to_string()));
        };
        let bytes = count
            .trim()
            .parse::<u64>()
            .map_err(|_| ProtocolError::MalformedAck(line.to_string()))?;
        Ok(Self { bytes: Some(bytes) })
    }

    /// Encodes the acknowledgment.
    pub fn encode(&self) -> String {
        match self.bytes {
            Some(n) => format!("{ACK_TOKEN},{n}"),
            None => ACK_TOKEN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parse_current_generation() {
        let req = TransferRequest::parse("REQUEST a.txt TCP").unwrap();
        assert_eq!(req.filename, "a.txt");
        assert_eq!(req.transport, "TCP");
    }

    #[test]
    fn request_parse_legacy_generation() {
        let req = TransferRequest::parse("a.txt,TCP").unwrap();
        assert_eq!(req.filename, "a.txt");
        assert_eq!(req.transport, "TCP");
    }

    #[test]
    fn request_parse_legacy_with_spaces() {
        let req = TransferRequest::parse(" b.txt , tcp \n").unwrap();
        assert_eq!(req.filename, "b.txt");
        assert_eq!(req.transport, "tcp");
    }

    #[test]
    fn request_parse_wrong_token_count() {
        assert!(TransferRequest::parse("REQUEST a.txt").is_err());
        assert!(TransferRequest::parse("REQUEST a.txt TCP extra").is_err());
    }

    #[test]
    fn request_parse_missing_keyword() {
        assert!(TransferRequest::parse("GET a.txt TCP").is_err());
        assert!(TransferRequest::parse("a.txt").is_err());
        assert!(TransferRequest::parse("").is_err());
        assert!(TransferRequest::parse(",TCP").is_err());
        assert!(TransferRequest::parse("a.txt,").is_err());
    }

    #[test]
    fn request_transport_case_insensitive() {
        assert!(TransferRequest::parse("REQUEST a.txt tcp")
            .unwrap()
            .is_supported_transport());
        assert!(TransferRequest::parse("REQUEST a.txt Tcp")
            .unwrap()
            .is_supported_transport());
        assert!(!TransferRequest::parse("REQUEST a.txt UDP")
            .unwrap()
            .is_supported_transport());
    }

    #[test]
    fn request_encode_roundtrip() {
        let req = TransferRequest::new("data.bin");
        assert_eq!(req.encode(), "REQUEST data.bin TCP");
        assert_eq!(TransferRequest::parse(&req.encode()).unwrap(), req);
    }

    #[test]
    fn reply_parse_structured_grant() {
        let reply = NegotiationReply::parse("RESPONSE,TCP,5001,a.txt").unwrap();
        let NegotiationReply::Grant(grant) = reply else {
            panic!("expected grant");
        };
        assert_eq!(grant.port, 5001);
        assert_eq!(grant.transport, "TCP");
        assert_eq!(grant.filename.as_deref(), Some("a.txt"));
    }

    #[test]
    fn reply_parse_legacy_bare_port() {
        let reply = NegotiationReply::parse("5000\n").unwrap();
        let NegotiationReply::Grant(grant) = reply else {
            panic!("expected grant");
        };
        assert_eq!(grant.port, 5000);
        assert_eq!(grant.filename, None);
    }

    #[test]
    fn reply_parse_errors() {
        assert_eq!(
            NegotiationReply::parse("ERRO,file not found").unwrap(),
            NegotiationReply::Error("file not found".into())
        );
        // Legacy deployments emit a colon-separated reason.
        assert_eq!(
            NegotiationReply::parse("ERRO: Arquivo não encontrado").unwrap(),
            NegotiationReply::Error("Arquivo não encontrado".into())
        );
        assert_eq!(
            NegotiationReply::parse("ERRO").unwrap(),
            NegotiationReply::Error(String::new())
        );
    }

    #[test]
    fn reply_parse_garbage() {
        assert!(NegotiationReply::parse("not a port").is_err());
        assert!(NegotiationReply::parse("RESPONSE,TCP,5001").is_err());
        assert!(NegotiationReply::parse("RESPONSE,TCP,70000,a.txt").is_err());
        assert!(NegotiationReply::parse("99999").is_err());
    }

    #[test]
    fn reply_encode_grant() {
        let reply = NegotiationReply::grant(5003, "b.txt");
        assert_eq!(reply.encode(), "RESPONSE,TCP,5003,b.txt");
        assert_eq!(NegotiationReply::parse(&reply.encode()).unwrap(), reply);
    }

    #[test]
    fn reply_encode_reject() {
        let reply = NegotiationReply::reject(RejectReason::NoPortsAvailable);
        assert_eq!(reply.encode(), "ERRO,no ports available");
    }

    #[test]
    fn ack_parse_bare_and_counted() {
        assert_eq!(Ack::parse("FTCP_ACK").unwrap().bytes, None);
        assert_eq!(Ack::parse("FTCP_ACK,1234").unwrap().bytes, Some(1234));
        assert_eq!(Ack::parse("FTCP_ACK,0\n").unwrap().bytes, Some(0));
    }

    #[test]
    fn ack_parse_malformed() {
        assert!(Ack::parse("ACK").is_err());
        assert!(Ack::parse("FTCP_ACK,abc").is_err());
        assert!(Ack::parse("FTCP_ACK 1234").is_err());
        assert!(Ack::parse("").is_err());
    }

    #[test]
    fn ack_encode() {
        assert_eq!(Ack { bytes: None }.encode(), "FTCP_ACK");
        assert_eq!(Ack::with_count(42).encode(), "FTCP_ACK,42");
    }
}
