//! # Thicket
//!
//! Outbound response layer for the Thicket multiplayer game server.
//!
//! The server's session handlers and broadcast loops talk to clients
//! exclusively through the six typed send operations in [`outbound`]:
//! each builds one tagged envelope, encodes it to JSON, frames it with
//! the `<END>` delimiter, and writes it to the client's connection as a
//! single atomic unit.
//!
//! ```text
//! session / broadcast
//!        │  outbound::send_* (this crate)
//!        ▼
//! Response envelope        (thicket-protocol)
//!        ▼
//! frame + atomic write     (thicket-transport)
//! ```
//!
//! Everything above this layer — accepting sockets, reading client input,
//! the authoritative world and user repositories — is a collaborator.
//! This crate defines only the seams it consumes: [`WorldCatalog`] for
//! world-state snapshots and [`ServerConfig`] for the client version and
//! greeting.

mod config;
mod error;
mod world;

pub mod outbound;

pub use config::ServerConfig;
pub use error::ThicketError;
pub use world::WorldCatalog;

pub use thicket_protocol::{
    Codec, JsonCodec, MapBody, Maps, Npcs, Obmaps, Position, ProtocolError,
    Response, ResponseType, Trainers, User,
};
pub use thicket_transport::{Connection, ConnectionId, TcpConnection, TransportError};
