//! Error types for the protocol layer.
//!
//! Exactly two things can go wrong here: a value that the wire encoding
//! cannot represent, and bytes that don't decode back. Both carry the
//! underlying `serde_json` error and propagate to the caller unchanged —
//! this layer never logs, retries, or suppresses.

/// Errors that can occur while encoding or decoding envelopes.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed: the body contains data the wire encoding
    /// cannot represent (e.g. a map with non-string keys). This is a
    /// programmer/data error, never retried.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed text, a truncated frame, an
    /// unknown `Type` ordinal, or a `Body` that doesn't match its `Type`.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
