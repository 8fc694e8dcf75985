//! Read seam for the authoritative world data.

use thicket_protocol::{Maps, Npcs, Obmaps, Trainers};

/// Source of the four world-state snapshots embedded in a map response.
///
/// The authoritative map repository lives above this crate; the outbound
/// layer only needs a way to ask it for the current catalogs at the
/// moment a map response is built. Implementations return owned
/// snapshots, so a send never holds a lock on live world state across
/// an await point.
pub trait WorldCatalog: Send + Sync {
    /// Obstacle map overlays, keyed by map name.
    fn obmaps(&self) -> Obmaps;

    /// Map definitions, keyed by map name.
    fn maps(&self) -> Maps;

    /// NPC placements across all maps.
    fn npcs(&self) -> Npcs;

    /// Trainer placements across all maps.
    fn trainers(&self) -> Trainers;
}
