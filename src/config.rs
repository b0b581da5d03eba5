//! Simulation configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Example:
//!
//! ```json
//! {
//!   "world": { "cache_capacity": 64 },
//!   "spawns": { "respawn_seconds": 120 },
//!   "combat": { "max_turns": 30 },
//!   "lives": { "max_lives": 5 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::CombatRules;
use crate::error::ConfigError;
use crate::lives::LivesPolicy;
use crate::world::DEFAULT_CACHE_CAPACITY;
use crate::zone_state::DEFAULT_RESPAWN_SECONDS;

/// World generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Zones kept in the generation cache (default: 128, 0 disables it).
    pub cache_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Spawn lifecycle settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds a killed spawn stays dead (default: 300).
    pub respawn_seconds: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            respawn_seconds: DEFAULT_RESPAWN_SECONDS,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World generation.
    pub world: WorldConfig,
    /// Spawn lifecycle.
    pub spawns: SpawnConfig,
    /// Combat rules.
    pub combat: CombatRules,
    /// Life regeneration.
    pub lives: LivesPolicy,
}

impl SimConfig {
    /// Parse and validate a config from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.combat.max_turns == 0 {
            return invalid("combat.max_turns", "must be at least 1");
        }
        if !(self.combat.heal_ratio.is_finite() && self.combat.heal_ratio >= 0.0) {
            return invalid("combat.heal_ratio", "must be a finite, non-negative number");
        }
        if !(0.0..=1.0).contains(&self.combat.heal_floor) {
            return invalid("combat.heal_floor", "must be between 0 and 1");
        }
        if self.lives.max_lives == 0 {
            return invalid("lives.max_lives", "must be at least 1");
        }
        if self.lives.regen_interval_seconds == 0 {
            return invalid("lives.regen_interval_seconds", "must be at least 1");
        }
        Ok(())
    }
}
