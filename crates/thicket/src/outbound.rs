//! The six typed send operations.
//!
//! Each operation builds exactly one [`Response`], encodes it with the
//! JSON codec, and hands the bytes to the framer for a single atomic
//! write on the connection. There is no partial success: either the
//! whole framed message reaches the socket's send path, or the caller
//! gets a [`ThicketError`] and should drop the connection.

use thicket_protocol::{Codec, JsonCodec, MapBody, Position, Response, User};
use thicket_transport::framing;
use thicket_transport::{Connection, TransportError};

use crate::{ServerConfig, ThicketError, WorldCatalog};

/// Encodes and writes one response as a single framed message.
async fn write_response<C>(conn: &C, response: Response) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
{
    let kind = response.kind();
    let payload = JsonCodec.encode(&response)?;
    tracing::trace!(conn = %conn.id(), %kind, len = payload.len(), "sending response");
    framing::write_frame(conn, &payload).await?;
    Ok(())
}

/// Sends the full map response to a client entering a map.
///
/// The four world catalogs are snapshotted from `world` at call time, so
/// every client entering in the same tick sees the same world. `users`
/// is the list of players already on the client's map, and `position` is
/// where the entering client has been placed.
pub async fn send_map<C, W>(
    conn: &C,
    world: &W,
    position: Position,
    users: Vec<User>,
    greeting_text: &str,
) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
    W: WorldCatalog + ?Sized,
{
    let body = MapBody {
        obmaps: world.obmaps(),
        maps: world.maps(),
        npcs: world.npcs(),
        trainers: world.trainers(),
        position,
        users,
        greeting_text: greeting_text.to_string(),
    };
    write_response(conn, Response::Map(body)).await
}

/// Notifies a client that another user moved or changed appearance.
pub async fn send_position_change<C>(conn: &C, user: User) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
{
    write_response(conn, Response::PositionChange(user)).await
}

/// Rejects a login because the requested name is already connected.
pub async fn send_user_already_present<C>(conn: &C) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
{
    write_response(conn, Response::UserAlreadyPresent).await
}

/// Rejects a client whose version does not match the server's.
///
/// The body is the full human-readable sentence naming the version from
/// `config`, not the bare version string; clients display it verbatim.
pub async fn send_version_mismatch<C>(
    conn: &C,
    config: &ServerConfig,
) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
{
    let message = format!("Required version is {}", config.client_version);
    write_response(conn, Response::VersionMismatch(message)).await
}

/// Tells a client its reported movement was rejected by the server.
pub async fn send_position_implausible<C>(
    conn: &C,
    message: &str,
) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
{
    write_response(conn, Response::PositionImplausible(message.to_string())).await
}

/// Announces that a user left, so clients drop them from their map.
pub async fn send_user_removed<C>(conn: &C, user_name: &str) -> Result<(), ThicketError>
where
    C: Connection<Error = TransportError>,
{
    write_response(conn, Response::UserRemoved(user_name.to_string())).await
}
