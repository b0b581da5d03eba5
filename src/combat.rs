//! Combat simulator.
//!
//! Resolves a battle between a player party and an enemy pack into an
//! outcome and a readable turn log. Battlers are plain values: the caller
//! builds them, the engine mutates them for the duration of one battle and
//! hands back the final state.

mod battler;
mod engine;

pub use battler::{Battler, CombatStats, Role, Side, ROLE_PRIORITY};
pub use engine::{resolve, resolve_with, BattleReport, CombatRules, Outcome};
