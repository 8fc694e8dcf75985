//! Transport layer for Thicket's outbound stream.
//!
//! Provides the write-capable [`Connection`] trait, its TCP implementation
//! ([`TcpConnection`]), and the [`framing`] module that turns one encoded
//! envelope into one delimited frame on the byte stream.
//!
//! This crate deliberately has no accept loop and no receive path: accepting
//! sockets and reading client input belong to the session layer. What lives
//! here is the single piece of shared state the outbound protocol depends
//! on — a per-connection write handle whose sends are atomic with respect
//! to each other, so two messages can never interleave on the wire.

#![allow(async_fn_in_trait)]

pub mod framing;

mod error;
mod tcp;

pub use error::TransportError;
pub use tcp::TcpConnection;

use std::fmt;

/// Opaque identifier for a connection, used in logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A write-capable handle to one client connection.
///
/// One `send` call transmits one complete frame: implementations must make
/// each send atomic with respect to concurrent sends on the same connection.
/// A send that fails leaves the stream's framing undefined — callers treat
/// any error as connection-fatal and retire the handle.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Writes `data` to the remote peer as one atomic unit.
    ///
    /// No retry and no partial-write recovery: either the full buffer is
    /// handed to the transport or an error comes back.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Closes the outbound half of the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
