//! Codec trait and implementations for serializing outbound envelopes.
//!
//! A "codec" converts between Rust types and raw bytes. The send layer
//! doesn't care HOW envelopes are serialized — it just needs something
//! that implements the [`Codec`] trait. Today that is [`JsonCodec`]; the
//! existing client speaks JSON, and the seam leaves room for a binary
//! codec if the wire format ever gets versioned.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec is shared across per-connection
/// tasks on the Tokio thread pool and must not borrow temporary data.
///
/// Decoding exists for tests, tooling, and the receiving end of the demo
/// client; the production server only encodes.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the value contains data that
    /// cannot be represented in this codec's format. Encoding has no side
    /// effects: on failure, nothing has been written anywhere.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// truncated, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable and schema-less on the wire: the receiver learns the body
/// shape from the envelope's `Type` tag, not from the encoding.
///
/// ## Example
///
/// ```rust
/// use thicket_protocol::{Codec, JsonCodec, Response};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&Response::UserRemoved("ash".into())).unwrap();
/// assert_eq!(bytes, br#"{"Type":5,"Body":"ash"}"#);
///
/// let decoded: Response = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded, Response::UserRemoved("ash".into()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Response, ResponseType};

    use std::collections::HashMap;

    #[test]
    fn test_encode_emits_type_before_body() {
        // The receiver dispatches on Type before touching Body, so the tag
        // comes first in the serialized text.
        let codec = JsonCodec;
        let bytes = codec.encode(&Response::UserAlreadyPresent).unwrap();
        assert_eq!(bytes, br#"{"Type":2,"Body":null}"#);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = JsonCodec;
        let response = Response::PositionImplausible("through a wall".into());
        let bytes = codec.encode(&response).unwrap();
        let decoded: Response = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, response);
        assert_eq!(decoded.kind(), ResponseType::PositionImplausible);
    }

    #[test]
    fn test_encode_unrepresentable_value_fails() {
        // JSON object keys must be strings; a tuple-keyed map cannot be
        // represented and must surface as an Encode error.
        let codec = JsonCodec;
        let mut unencodable: HashMap<(u32, u32), &str> = HashMap::new();
        unencodable.insert((3, 4), "fernwood");

        let result = codec.encode(&unencodable);
        assert!(matches!(result, Err(ProtocolError::Encode(_))));
    }

    #[test]
    fn test_decode_truncated_input_fails() {
        let codec = JsonCodec;
        let result: Result<Response, _> = codec.decode(br#"{"Type":5,"Bo"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
