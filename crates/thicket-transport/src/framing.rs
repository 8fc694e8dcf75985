//! Delimiter framing over an unbounded byte stream.
//!
//! The wire carries no length prefix: each message is the encoded envelope
//! followed by the five-byte marker [`DELIMITER`] (`<END>`), and the
//! receiver buffers bytes and splits on the first marker it sees.
//!
//! Free-form body strings (greeting text, error messages) may legally
//! contain `<END>` themselves, which would corrupt the boundary. To close
//! that hole, [`frame`] byte-stuffs the payload before appending the
//! marker: the escape byte `0x1B` is doubled, and any literal `<END>` in
//! the payload becomes `0x1B '['`. A stuffed payload can never contain the
//! marker, so the first `<END>` on the stream is always a true boundary,
//! and [`FrameBuffer`] reverses the stuffing after splitting.
//!
//! Compatibility note: serde_json escapes control characters inside
//! strings, so encoded envelopes never contain a raw `0x1B` and the stuffing
//! pass is an identity for every payload that framed correctly before.
//! Only payloads that previously corrupted the stream produce different
//! bytes. A legacy receiver that splits on `<END>` without unstuffing reads
//! all delimiter-free traffic unchanged.

use crate::{Connection, TransportError};

/// The frame terminator, appended after every message.
pub const DELIMITER: &[u8] = b"<END>";

/// Escape byte for the stuffing pass. Never present in encoded JSON.
const ESCAPE: u8 = 0x1B;

/// `ESCAPE ESCAPE` — a literal escape byte in the payload.
const STUFFED_ESCAPE: [u8; 2] = [ESCAPE, ESCAPE];

/// `ESCAPE '['` — a literal `<END>` in the payload.
const STUFFED_DELIMITER: [u8; 2] = [ESCAPE, b'['];

/// Builds one frame: stuffed payload plus trailing delimiter.
///
/// The returned buffer is written in a single send so the frame stays
/// contiguous on the wire.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut framed = stuff(payload);
    framed.extend_from_slice(DELIMITER);
    framed
}

/// Frames `payload` and writes it to `conn` as one atomic send.
///
/// This is the only I/O in the outbound layer. No retry, no partial-write
/// recovery: the connection either accepts the whole frame or returns an
/// error, which propagates to the caller unchanged.
pub async fn write_frame<C: Connection>(
    conn: &C,
    payload: &[u8],
) -> Result<(), C::Error> {
    conn.send(&frame(payload)).await
}

/// Byte-stuffs `payload` so it cannot contain [`DELIMITER`].
fn stuff(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + DELIMITER.len());
    let mut rest = payload;
    while !rest.is_empty() {
        if rest[0] == ESCAPE {
            out.extend_from_slice(&STUFFED_ESCAPE);
            rest = &rest[1..];
        } else if rest.starts_with(DELIMITER) {
            out.extend_from_slice(&STUFFED_DELIMITER);
            rest = &rest[DELIMITER.len()..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out
}

/// Reverses [`stuff`]. Fails on a dangling or unknown escape sequence.
fn unstuff(frame: &[u8]) -> Result<Vec<u8>, TransportError> {
    let mut out = Vec::with_capacity(frame.len());
    let mut rest = frame;
    while !rest.is_empty() {
        if rest[0] == ESCAPE {
            match rest.get(1) {
                Some(&ESCAPE) => out.push(ESCAPE),
                Some(&b'[') => out.extend_from_slice(DELIMITER),
                Some(other) => {
                    return Err(TransportError::InvalidFrame(format!(
                        "unknown escape sequence 0x1b 0x{other:02x}"
                    )));
                }
                None => {
                    return Err(TransportError::InvalidFrame(
                        "dangling escape byte at end of frame".into(),
                    ));
                }
            }
            rest = &rest[2..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// FrameBuffer
// ---------------------------------------------------------------------------

/// Receiver-side accumulator that recovers frames from a byte stream.
///
/// Feed it whatever the socket hands you; [`next_frame`](Self::next_frame)
/// pops one complete payload per call, or `None` until a full frame has
/// arrived. Used by tests, tooling, and the demo client — the production
/// server never reads.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: Vec<u8>,
}

impl FrameBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends freshly received bytes.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pops the next complete payload, with stuffing reversed.
    ///
    /// Returns `Ok(None)` while the buffer holds no complete frame yet.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidFrame`] if the frame's escape
    /// sequences are malformed.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let Some(pos) = self
            .buf
            .windows(DELIMITER.len())
            .position(|window| window == DELIMITER)
        else {
            return Ok(None);
        };

        let rest = self.buf.split_off(pos + DELIMITER.len());
        let mut frame = std::mem::replace(&mut self.buf, rest);
        frame.truncate(pos);

        unstuff(&frame).map(Some)
    }
}
