//! Unified error type for the outbound layer.

use thicket_protocol::ProtocolError;
use thicket_transport::TransportError;

/// Top-level error returned by the send operations.
///
/// Both variants are `#[error(transparent)]` with `#[from]`: a send
/// operation's error is exactly the encoder's or the framer's error,
/// unmodified — no extra wrapping semantics. Callers treat any of these
/// as connection-fatal, since a failed or partial write leaves the
/// stream's framing undefined for every later message.
#[derive(Debug, thiserror::Error)]
pub enum ThicketError {
    /// Encoding the envelope failed (programmer/data error, not retried).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Writing the framed message failed (peer gone, network fault).
    #[error(transparent)]
    Transport(#[from] TransportError),
}
