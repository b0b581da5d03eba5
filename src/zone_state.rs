//! Zone state: player movement and the enemy spawn lifecycle.
//!
//! Spawn points are the only shared mutable state in the simulation. They
//! live behind the [`SpawnStore`] seam; [`MemorySpawnStore`] keeps them in
//! process, other stores can back them with a database.

mod manager;
mod movement;
mod spawn;

pub use manager::{encounter_seed_key, Encounter, ZoneStateManager};
pub use movement::{validate_target, zone_transition, MoveOutcome, MoveRejection, MoveRequest};
pub use spawn::{MemorySpawnStore, SpawnPoint, SpawnStore, DEFAULT_RESPAWN_SECONDS};
