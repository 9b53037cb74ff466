//! UDP negotiation for FTCP.
//!
//! The server side owns the connectionless listening endpoint: the
//! [`server::Negotiator`] validates each request against the [`catalog`],
//! allocates a transfer port from the [`pool`], and spawns one detached
//! transfer worker per grant. The client side ([`client::Requester`]) sends
//! the request datagram, awaits the grant with a bounded timeout, and drives
//! the TCP fetch.

pub mod catalog;
pub mod client;
pub mod error;
pub mod pool;
pub mod server;

pub use catalog::Catalog;
pub use client::Requester;
pub use error::NegotiationError;
pub use pool::PortPool;
pub use server::Negotiator;
