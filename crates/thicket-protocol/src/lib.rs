//! Outbound wire protocol for Thicket.
//!
//! This crate defines the server→client half of the wire "language":
//!
//! - **Types** ([`Response`], [`ResponseType`], [`MapBody`], the snapshot
//!   models) — the envelope and body structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how envelopes become
//!   bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong doing so.
//!
//! # Architecture
//!
//! The protocol layer sits between the game's send façade and the framed
//! transport. It knows nothing about connections or sockets — it only
//! knows how to represent and serialize one envelope at a time:
//!
//! ```text
//! send ops (thicket) → Response (this crate) → framing (thicket-transport)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    MapBody, Maps, Npcs, Obmaps, Position, Response, ResponseType, Trainers,
    User,
};
