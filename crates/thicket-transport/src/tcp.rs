//! TCP connection handle over a `tokio` stream.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A write-capable handle to one accepted TCP stream.
///
/// The write half lives behind a `tokio::sync::Mutex`, and every
/// [`send`](Connection::send) holds the lock across the entire buffer.
/// That makes each framed message atomic on the wire: concurrent sends
/// from a per-session handler and a broadcast task serialize instead of
/// interleaving, which would corrupt framing for every later message on
/// the connection. The handle is `Clone`; clones share the same lock.
#[derive(Clone)]
pub struct TcpConnection {
    id: ConnectionId,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl TcpConnection {
    /// Adopts an already-accepted stream, returning the write handle and
    /// the read half.
    ///
    /// Accepting sockets and reading client input are the session layer's
    /// job; it keeps the returned [`OwnedReadHalf`] for its inbound loop
    /// and hands the `TcpConnection` to everything that sends.
    pub fn adopt(stream: TcpStream) -> (Self, OwnedReadHalf) {
        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        let peer = stream.peer_addr().ok();
        tracing::debug!(%id, ?peer, "adopted TCP connection");

        let (read, write) = stream.into_split();
        let conn = Self {
            id,
            writer: Arc::new(Mutex::new(write)),
        };
        (conn, read)
    }
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        // Lock held until the whole buffer is written and flushed — the
        // frame-atomicity invariant lives here.
        let mut writer = self.writer.lock().await;
        writer
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn close(&self) -> Result<(), TransportError> {
        let mut writer = self.writer.lock().await;
        tracing::debug!(id = %self.id, "closing TCP connection");
        writer.shutdown().await.map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
