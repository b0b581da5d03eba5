//! Error types for the simulation core.
//!
//! Rejections that callers are expected to handle as ordinary outcomes (a
//! blocked move, an empty encounter, a refused heal) are values, not errors.
//! The types here cover contract violations and configuration problems.

use std::path::PathBuf;

use thiserror::Error;

/// A zone key could not be parsed or names a zone outside the world ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneKeyError {
    /// The key is not of the form `"{x}-{y}"`.
    #[error("malformed zone key: {0:?}")]
    Malformed(String),
    /// The coordinates are outside `[-R, R]` on at least one axis.
    #[error("zone ({x}, {y}) is outside the world ring")]
    OutOfRange {
        /// Requested x coordinate.
        x: i32,
        /// Requested y coordinate.
        y: i32,
    },
}

/// A tile symbol that does not name any tile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown tile symbol {0:?}")]
pub struct TileError(pub char);

/// A textual grid could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// A symbol in the grid does not name a tile type.
    #[error(transparent)]
    UnknownTile(#[from] TileError),
    /// The grid does not have the expected number of rows.
    #[error("grid has {len} rows, expected {expected}")]
    RowCount {
        /// Number of rows found.
        len: usize,
        /// Number of rows expected.
        expected: usize,
    },
    /// A row does not have the expected number of cells.
    #[error("grid row {row} has {len} cells, expected {expected}")]
    Shape {
        /// Offending row index.
        row: usize,
        /// Number of cells found.
        len: usize,
        /// Number of cells expected.
        expected: usize,
    },
}

/// Roster construction failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// The role string does not name a known combat role.
    #[error("unknown combat role {0:?}")]
    UnknownRole(String),
    /// The rarity string does not name a known rarity tier.
    #[error("unknown rarity {0:?}")]
    UnknownRarity(String),
    /// The slot string does not name a known equipment slot.
    #[error("unknown equipment slot {0:?}")]
    UnknownSlot(String),
}

/// Loading an archetype catalog failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not valid JSON for a catalog.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loading the simulation configuration failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for a config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_key_error_display() {
        let err = ZoneKeyError::OutOfRange { x: 11, y: 0 };
        assert_eq!(err.to_string(), "zone (11, 0) is outside the world ring");
        let err = ZoneKeyError::Malformed("abc".to_string());
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_roster_error_display() {
        let err = RosterError::UnknownRole("bard".to_string());
        assert_eq!(err.to_string(), "unknown combat role \"bard\"");
    }
}
