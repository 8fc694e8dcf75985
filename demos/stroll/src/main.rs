//! Stroll: one server, one client, all six responses.
//!
//! Boots a loopback Thicket server, connects a single client, and walks
//! it through the full outbound vocabulary: the map on entry, another
//! player moving, then each of the rejection and removal notices. The
//! client side reassembles frames and decodes them exactly as a game
//! client would.
//!
//! Run with `RUST_LOG=debug cargo run -p stroll` to watch both sides.

use serde_json::json;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::{fmt, EnvFilter};

use thicket::outbound;
use thicket::{
    Codec, Connection, JsonCodec, Maps, Npcs, Obmaps, Position, Response,
    ServerConfig, TcpConnection, Trainers, User, WorldCatalog,
};
use thicket_transport::framing::FrameBuffer;

/// A small fixed world: one map, one NPC, one trainer.
struct DemoWorld;

impl WorldCatalog for DemoWorld {
    fn obmaps(&self) -> Obmaps {
        Obmaps(json!({
            "thicket_edge": [
                [0, 0, 0, 1],
                [1, 0, 0, 0],
                [0, 0, 1, 0],
            ]
        }))
    }

    fn maps(&self) -> Maps {
        Maps(json!({
            "thicket_edge": {"width": 4, "height": 3}
        }))
    }

    fn npcs(&self) -> Npcs {
        Npcs(json!([
            {"name": "old gardener", "map": "thicket_edge", "x": 3, "y": 2}
        ]))
    }

    fn trainers(&self) -> Trainers {
        Trainers(json!([
            {"name": "rival", "map": "thicket_edge", "x": 0, "y": 0}
        ]))
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("listener has no local addr");
    tracing::info!(%addr, "stroll server listening");

    let client = tokio::spawn(run_client(addr));

    let (stream, peer) = listener.accept().await.expect("accept failed");
    tracing::info!(%peer, "client connected");
    let (conn, _read) = TcpConnection::adopt(stream);

    run_server(&conn).await;
    conn.close().await.expect("close failed");

    client.await.expect("client task panicked");
    tracing::info!("stroll complete");
}

/// Sends every response type once, in the order a real session might.
async fn run_server(conn: &TcpConnection) {
    let config = ServerConfig {
        client_version: "0.9.1".to_string(),
        greeting_text: "A narrow path leads into the thicket.".to_string(),
    };
    let world = DemoWorld;

    outbound::send_map(
        conn,
        &world,
        Position::new("thicket_edge", 1, 1),
        vec![User::new("fern", Position::new("thicket_edge", 2, 0))],
        &config.greeting_text,
    )
    .await
    .expect("map send failed");

    outbound::send_position_change(
        conn,
        User::new("fern", Position::new("thicket_edge", 2, 1)),
    )
    .await
    .expect("position-change send failed");

    outbound::send_user_already_present(conn)
        .await
        .expect("already-present send failed");

    outbound::send_version_mismatch(conn, &config)
        .await
        .expect("version-mismatch send failed");

    outbound::send_position_implausible(conn, "moved 12 tiles in one step")
        .await
        .expect("implausible send failed");

    outbound::send_user_removed(conn, "fern")
        .await
        .expect("removed send failed");
}

/// Reads the stream to EOF and decodes each frame like a game client.
async fn run_client(addr: std::net::SocketAddr) {
    let mut stream = TcpStream::connect(addr).await.expect("connect failed");

    let mut received = Vec::new();
    stream
        .read_to_end(&mut received)
        .await
        .expect("read failed");

    let mut buffer = FrameBuffer::new();
    buffer.feed(&received);

    while let Some(payload) = buffer.next_frame().expect("bad frame on the wire") {
        let response: Response = JsonCodec.decode(&payload).expect("undecodable payload");
        match &response {
            Response::Map(body) => {
                tracing::info!(
                    kind = %response.kind(),
                    position = ?body.position,
                    users = body.users.len(),
                    greeting = %body.greeting_text,
                    "client got map"
                );
            }
            Response::PositionChange(user) => {
                tracing::info!(kind = %response.kind(), user = %user.name, "client got move");
            }
            Response::UserAlreadyPresent => {
                tracing::info!(kind = %response.kind(), "client got name rejection");
            }
            Response::VersionMismatch(message)
            | Response::PositionImplausible(message)
            | Response::UserRemoved(message) => {
                tracing::info!(kind = %response.kind(), %message, "client got notice");
            }
        }
    }
}
