//! Core wire types for Thicket's outbound protocol.
//!
//! This module defines every server→client message that travels "on the
//! wire". The top-level type is [`Response`] — a tagged envelope that
//! serializes to exactly:
//!
//! ```text
//! { "Type": <integer ordinal>, "Body": <payload-or-null> }
//! ```
//!
//! The receiver reads `Type` first and only then knows how to interpret
//! `Body`; there is no schema on the wire. Because each response type has
//! a fixed body shape, [`Response`] is a sum type: one variant per
//! [`ResponseType`], each carrying its strongly-typed payload. Constructing
//! an envelope whose body doesn't match its tag is unrepresentable.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use std::fmt;

// ---------------------------------------------------------------------------
// ResponseType
// ---------------------------------------------------------------------------

/// The wire tag of an outbound message.
///
/// This is a closed enumeration: the wire representation is the variant's
/// **ordinal** (0–5), not its name, so the discriminants here are load-bearing
/// and the order must never change. Serde's derive would tag with the variant
/// name, so `Serialize`/`Deserialize` are implemented by hand further down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResponseType {
    /// Full world-state snapshot for a freshly joined client.
    Map = 0,
    /// A single user moved.
    PositionChange = 1,
    /// The requested user name is already connected. No body.
    UserAlreadyPresent = 2,
    /// The client's version is not accepted by this server.
    VersionMismatch = 3,
    /// A reported movement was rejected as implausible.
    PositionImplausible = 4,
    /// A user left and should be removed from the client's world.
    UserRemoved = 5,
}

impl ResponseType {
    /// Returns the wire ordinal for this response type.
    pub fn as_wire(self) -> i32 {
        self as i32
    }

    /// Maps a wire ordinal back to a response type.
    ///
    /// Returns `None` for ordinals outside the closed set — decoding such
    /// a tag is a protocol error, never a fall-through.
    pub fn from_wire(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Map),
            1 => Some(Self::PositionChange),
            2 => Some(Self::UserAlreadyPresent),
            3 => Some(Self::VersionMismatch),
            4 => Some(Self::PositionImplausible),
            5 => Some(Self::UserRemoved),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Map => "MAP",
            Self::PositionChange => "POSITION_CHANGE",
            Self::UserAlreadyPresent => "USER_ALREADY_PRESENT",
            Self::VersionMismatch => "VERSION_MISMATCH",
            Self::PositionImplausible => "POSITION_IMPLAUSIBLE",
            Self::UserRemoved => "USER_REMOVED",
        };
        write!(f, "{name}")
    }
}

impl Serialize for ResponseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ResponseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinal = i32::deserialize(deserializer)?;
        Self::from_wire(ordinal).ok_or_else(|| {
            de::Error::custom(format!("unknown response type ordinal {ordinal}"))
        })
    }
}

// ---------------------------------------------------------------------------
// Snapshot models
// ---------------------------------------------------------------------------

/// A position on a named map.
///
/// Wire field names are capitalized to match the existing client decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "Map")]
    pub map: String,
    #[serde(rename = "X")]
    pub x: u64,
    #[serde(rename = "Y")]
    pub y: u64,
}

impl Position {
    pub fn new(map: impl Into<String>, x: u64, y: u64) -> Self {
        Self {
            map: map.into(),
            x,
            y,
        }
    }
}

/// A point-in-time snapshot of a connected user.
///
/// Produced by the user repository and passed through this layer untouched;
/// the protocol imposes nothing on it beyond serializability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Position")]
    pub position: Position,
}

impl User {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Obstacle-map snapshots owned by the world repository.
///
/// The `#[serde(transparent)]` newtypes below wrap [`serde_json::Value`]:
/// the world repository hands this layer already-validated snapshots, and
/// the envelope forwards them verbatim. Wrapping them keeps the `MapBody`
/// fields distinct at the type level without claiming any knowledge of
/// their internals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Obmaps(pub Value);

/// Tile-map snapshots owned by the world repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Maps(pub Value);

/// NPC snapshots owned by the world repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Npcs(pub Value);

/// Trainer snapshots owned by the world repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trainers(pub Value);

// ---------------------------------------------------------------------------
// MapBody
// ---------------------------------------------------------------------------

/// Body of a [`ResponseType::Map`] envelope: everything a client needs to
/// draw the world after joining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapBody {
    #[serde(rename = "Obmaps")]
    pub obmaps: Obmaps,
    #[serde(rename = "Maps")]
    pub maps: Maps,
    #[serde(rename = "NPCs")]
    pub npcs: Npcs,
    #[serde(rename = "Trainers")]
    pub trainers: Trainers,
    /// The requesting client's own coordinates.
    #[serde(rename = "Position")]
    pub position: Position,
    /// Currently present users. Order carries no meaning.
    #[serde(rename = "Users")]
    pub users: Vec<User>,
    #[serde(rename = "GreetingText")]
    pub greeting_text: String,
}

// ---------------------------------------------------------------------------
// Response — the envelope
// ---------------------------------------------------------------------------

/// One outbound message: the `{Type, Body}` envelope.
///
/// An envelope is built, encoded, and dropped within a single send call.
/// It is never mutated, shared across calls, or persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// World-state snapshot (ordinal 0).
    Map(MapBody),
    /// A user's new state after moving (ordinal 1).
    PositionChange(User),
    /// Requested user name already connected; body is null (ordinal 2).
    UserAlreadyPresent,
    /// Human-readable sentence naming the required client version (ordinal 3).
    VersionMismatch(String),
    /// Human-readable rejection of a movement (ordinal 4).
    PositionImplausible(String),
    /// Name of the user to remove (ordinal 5).
    UserRemoved(String),
}

impl Response {
    /// Returns the wire tag for this envelope.
    pub fn kind(&self) -> ResponseType {
        match self {
            Self::Map(_) => ResponseType::Map,
            Self::PositionChange(_) => ResponseType::PositionChange,
            Self::UserAlreadyPresent => ResponseType::UserAlreadyPresent,
            Self::VersionMismatch(_) => ResponseType::VersionMismatch,
            Self::PositionImplausible(_) => ResponseType::PositionImplausible,
            Self::UserRemoved(_) => ResponseType::UserRemoved,
        }
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut envelope = serializer.serialize_struct("Response", 2)?;
        envelope.serialize_field("Type", &self.kind())?;
        match self {
            Self::Map(body) => envelope.serialize_field("Body", body)?,
            Self::PositionChange(user) => envelope.serialize_field("Body", user)?,
            Self::UserAlreadyPresent => envelope.serialize_field("Body", &Value::Null)?,
            Self::VersionMismatch(text)
            | Self::PositionImplausible(text)
            | Self::UserRemoved(text) => envelope.serialize_field("Body", text)?,
        }
        envelope.end()
    }
}

/// Raw envelope as it appears on the wire, before `Body` is interpreted.
///
/// Deserialization is two-phase: first this struct (so `Type` is known),
/// then `Body` is decoded against the shape that `Type` dictates. A missing
/// `Body` is equivalent to null via `#[serde(default)]`.
#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(rename = "Type")]
    kind: ResponseType,
    #[serde(rename = "Body", default)]
    body: Value,
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn text<E: de::Error>(kind: ResponseType, body: Value) -> Result<String, E> {
            match body {
                Value::String(text) => Ok(text),
                other => Err(E::custom(format!(
                    "{kind} body must be a string, got {other}"
                ))),
            }
        }

        let wire = WireEnvelope::deserialize(deserializer)?;
        match wire.kind {
            ResponseType::Map => serde_json::from_value(wire.body)
                .map(Self::Map)
                .map_err(de::Error::custom),
            ResponseType::PositionChange => serde_json::from_value(wire.body)
                .map(Self::PositionChange)
                .map_err(de::Error::custom),
            ResponseType::UserAlreadyPresent => match wire.body {
                Value::Null => Ok(Self::UserAlreadyPresent),
                other => Err(de::Error::custom(format!(
                    "USER_ALREADY_PRESENT carries no body, got {other}"
                ))),
            },
            ResponseType::VersionMismatch => {
                text(wire.kind, wire.body).map(Self::VersionMismatch)
            }
            ResponseType::PositionImplausible => {
                text(wire.kind, wire.body).map(Self::PositionImplausible)
            }
            ResponseType::UserRemoved => {
                text(wire.kind, wire.body).map(Self::UserRemoved)
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire format is consumed by an existing client decoder, so these
    //! tests pin exact JSON shapes — ordinals, field names, null bodies —
    //! not just round-trip equality.

    use super::*;
    use serde_json::json;

    fn sample_position() -> Position {
        Position {
            map: "fernwood".into(),
            x: 12,
            y: 7,
        }
    }

    fn sample_user(name: &str) -> User {
        User {
            name: name.into(),
            position: sample_position(),
        }
    }

    fn sample_map_body() -> MapBody {
        MapBody {
            obmaps: Obmaps(json!({"fernwood": [[0, 1], [1, 0]]})),
            maps: Maps(json!({"fernwood": {"width": 2, "height": 2}})),
            npcs: Npcs(json!([{"name": "elder"}])),
            trainers: Trainers(json!([])),
            position: sample_position(),
            users: vec![sample_user("ash"), sample_user("misty")],
            greeting_text: "welcome to the thicket".into(),
        }
    }

    // =====================================================================
    // ResponseType — ordinals are the wire contract
    // =====================================================================

    #[test]
    fn test_response_type_ordinals_are_stable() {
        assert_eq!(ResponseType::Map.as_wire(), 0);
        assert_eq!(ResponseType::PositionChange.as_wire(), 1);
        assert_eq!(ResponseType::UserAlreadyPresent.as_wire(), 2);
        assert_eq!(ResponseType::VersionMismatch.as_wire(), 3);
        assert_eq!(ResponseType::PositionImplausible.as_wire(), 4);
        assert_eq!(ResponseType::UserRemoved.as_wire(), 5);
    }

    #[test]
    fn test_response_type_from_wire_round_trips() {
        for ordinal in 0..=5 {
            let kind = ResponseType::from_wire(ordinal).expect("ordinal in range");
            assert_eq!(kind.as_wire(), ordinal);
        }
    }

    #[test]
    fn test_response_type_from_wire_rejects_unknown_ordinals() {
        assert_eq!(ResponseType::from_wire(6), None);
        assert_eq!(ResponseType::from_wire(-1), None);
    }

    #[test]
    fn test_response_type_serializes_as_plain_integer() {
        // The tag is the ordinal, not the variant name.
        let json = serde_json::to_string(&ResponseType::VersionMismatch).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_response_type_display() {
        assert_eq!(ResponseType::Map.to_string(), "MAP");
        assert_eq!(
            ResponseType::UserAlreadyPresent.to_string(),
            "USER_ALREADY_PRESENT"
        );
    }

    // =====================================================================
    // Snapshot models — field names match the existing client
    // =====================================================================

    #[test]
    fn test_position_wire_field_names() {
        let json: Value = serde_json::to_value(sample_position()).unwrap();
        assert_eq!(json["Map"], "fernwood");
        assert_eq!(json["X"], 12);
        assert_eq!(json["Y"], 7);
    }

    #[test]
    fn test_user_wire_field_names() {
        let json: Value = serde_json::to_value(sample_user("ash")).unwrap();
        assert_eq!(json["Name"], "ash");
        assert_eq!(json["Position"]["Map"], "fernwood");
    }

    #[test]
    fn test_snapshot_newtypes_serialize_transparently() {
        // Obmaps(value) must serialize as the value itself, not `{"0": value}`.
        let obmaps = Obmaps(json!({"a": 1}));
        assert_eq!(serde_json::to_value(&obmaps).unwrap(), json!({"a": 1}));
    }

    // =====================================================================
    // Envelope wire shape — one test per response type
    // =====================================================================

    #[test]
    fn test_map_envelope_wire_shape() {
        let json: Value =
            serde_json::to_value(Response::Map(sample_map_body())).unwrap();

        assert_eq!(json["Type"], 0);
        let body = &json["Body"];
        assert!(body["Obmaps"].is_object());
        assert!(body["Maps"].is_object());
        assert!(body["NPCs"].is_array());
        assert!(body["Trainers"].is_array());
        assert_eq!(body["Position"]["X"], 12);
        assert_eq!(body["Users"].as_array().unwrap().len(), 2);
        assert_eq!(body["GreetingText"], "welcome to the thicket");
    }

    #[test]
    fn test_position_change_envelope_wire_shape() {
        let json: Value =
            serde_json::to_value(Response::PositionChange(sample_user("ash")))
                .unwrap();
        assert_eq!(json["Type"], 1);
        assert_eq!(json["Body"]["Name"], "ash");
    }

    #[test]
    fn test_user_already_present_envelope_body_is_null() {
        let json: Value =
            serde_json::to_value(Response::UserAlreadyPresent).unwrap();
        assert_eq!(json["Type"], 2);
        assert!(json["Body"].is_null());
    }

    #[test]
    fn test_version_mismatch_envelope_wire_shape() {
        let json: Value = serde_json::to_value(Response::VersionMismatch(
            "Required version is 1.2.3".into(),
        ))
        .unwrap();
        assert_eq!(json["Type"], 3);
        assert_eq!(json["Body"], "Required version is 1.2.3");
    }

    #[test]
    fn test_position_implausible_envelope_wire_shape() {
        let json: Value = serde_json::to_value(Response::PositionImplausible(
            "moved 40 tiles in one step".into(),
        ))
        .unwrap();
        assert_eq!(json["Type"], 4);
        assert_eq!(json["Body"], "moved 40 tiles in one step");
    }

    #[test]
    fn test_user_removed_envelope_wire_shape() {
        let json: Value =
            serde_json::to_value(Response::UserRemoved("ash".into())).unwrap();
        assert_eq!(json["Type"], 5);
        assert_eq!(json["Body"], "ash");
    }

    // =====================================================================
    // Round trips
    // =====================================================================

    #[test]
    fn test_every_variant_round_trips() {
        let responses = [
            Response::Map(sample_map_body()),
            Response::PositionChange(sample_user("ash")),
            Response::UserAlreadyPresent,
            Response::VersionMismatch("Required version is 0.9.0".into()),
            Response::PositionImplausible("off the map edge".into()),
            Response::UserRemoved("misty".into()),
        ];
        for response in responses {
            let bytes = serde_json::to_vec(&response).unwrap();
            let decoded: Response = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(response, decoded);
        }
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            Response::UserAlreadyPresent.kind(),
            ResponseType::UserAlreadyPresent
        );
        assert_eq!(
            Response::UserRemoved("ash".into()).kind(),
            ResponseType::UserRemoved
        );
    }

    // =====================================================================
    // Decode failures
    // =====================================================================

    #[test]
    fn test_decode_unknown_ordinal_fails() {
        let result: Result<Response, _> =
            serde_json::from_str(r#"{"Type": 9, "Body": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_body_mismatching_type_fails() {
        // USER_ALREADY_PRESENT must carry a null body.
        let result: Result<Response, _> =
            serde_json::from_str(r#"{"Type": 2, "Body": "unexpected"}"#);
        assert!(result.is_err());

        // VERSION_MISMATCH must carry a string body.
        let result: Result<Response, _> =
            serde_json::from_str(r#"{"Type": 3, "Body": {"v": 1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_missing_body_defaults_to_null() {
        // A body-less envelope with the body field omitted entirely is
        // still a valid USER_ALREADY_PRESENT.
        let decoded: Response = serde_json::from_str(r#"{"Type": 2}"#).unwrap();
        assert_eq!(decoded, Response::UserAlreadyPresent);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: Result<Response, _> = serde_json::from_slice(b"not json");
        assert!(result.is_err());
    }
}
