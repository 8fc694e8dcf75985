/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Writing to the underlying connection failed: the peer is gone or
    /// the network faulted. The message was not delivered and the stream's
    /// framing is undefined from here on.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// A received frame's escape sequences could not be reversed.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}
