// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Loco: simulation core of a persistent multiplayer browser RPG.
//!
//! This crate provides the rules of the game world, independent of any web
//! framework or database:
//! - Deterministic procedural zones on a toroidal world ring
//! - Turn-based party combat with a readable battle log
//! - Seeded enemy pack generation with rarity tiers
//! - Enemy spawn lifecycle and movement validation, safe under concurrency
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        ZoneStateManager             │
//! ├──────────────────┬──────────────────┤
//! │  Encounter gen   │  Spawn store     │
//! ├──────────────────┴──────────────────┤
//! │  World topology  │  Combat engine   │
//! └─────────────────────────────────────┘
//! ```

pub mod balance;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod error;
pub mod lives;
pub mod roster;
pub mod world;
pub mod zone_state;

pub use config::SimConfig;
pub use error::{CatalogError, ConfigError, GridError, RosterError, TileError, ZoneKeyError};

// Re-export key types at crate root for convenience
pub use combat::{resolve, BattleReport, Battler, Outcome, Role};
pub use encounter::{generate_pack, ArchetypeCatalog, EnemyInstance};
pub use world::{zone_info, Cell, TileType, ZoneCoord, ZoneInfo};
pub use zone_state::{MoveOutcome, MoveRequest, ZoneStateManager};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_fights_generated_pack() {
        let zone = ZoneCoord::new(1, 0).unwrap();
        let pack = generate_pack(zone_info(zone).level, &ArchetypeCatalog::default(), 3);
        let party = vec![
            roster::CharacterSheet::new("Ana", Role::Tank).with_level(5).to_battler(),
            roster::CharacterSheet::new("Bo", Role::Healer).with_level(5).to_battler(),
        ];
        let report = resolve(party, roster::pack_to_battlers(&pack));
        assert!(report.turns >= 1 && report.turns <= 50);
        assert!(!report.log.is_empty());
    }
}
