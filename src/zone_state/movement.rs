//! Movement requests and their outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encounter::EnemyInstance;
use crate::world::{Cell, TileType, ZoneCoord, ZoneInfo};
use crate::zone_state::SpawnPoint;

/// A player's request to step onto a cell of their current zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Zone the player is in.
    pub zone: ZoneCoord,
    /// Where the player stands now.
    pub from: Cell,
    /// Target cell.
    pub to: Cell,
    /// Lives of the moving character, when the caller tracks them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lives: Option<u32>,
}

impl MoveRequest {
    /// Create a move request without a lives check.
    #[must_use]
    pub const fn new(zone: ZoneCoord, from: Cell, to: Cell) -> Self {
        Self {
            zone,
            from,
            to,
            lives: None,
        }
    }

    /// Attach the character's current lives. A character with none cannot move.
    #[must_use]
    pub const fn with_lives(mut self, lives: u32) -> Self {
        self.lives = Some(lives);
        self
    }
}

/// Why a move was refused. Nothing is mutated on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MoveRejection {
    /// The target lies outside the 18×18 grid.
    #[error("cell {cell} is outside the zone")]
    OutOfBounds {
        /// Requested cell.
        cell: Cell,
    },
    /// The target tile cannot be walked on.
    #[error("cell {cell} is blocked by {tile}")]
    Blocked {
        /// Requested cell.
        cell: Cell,
        /// Tile at the cell.
        tile: TileType,
    },
    /// The character has no lives left and must wait for one to regenerate.
    #[error("no lives left")]
    OutOfLives,
}

/// Result of a movement request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The move was refused.
    Rejected(MoveRejection),
    /// The player stepped onto a cell of the same zone.
    Moved {
        /// New position.
        cell: Cell,
    },
    /// The player stepped through a portal into the neighbouring zone.
    ZoneChanged {
        /// Zone entered.
        zone: ZoneCoord,
        /// Entry cell in the new zone.
        cell: Cell,
    },
    /// The player stepped onto a shop.
    ShopEntered {
        /// Shop cell.
        cell: Cell,
    },
    /// The player woke an enemy spawn; a battle should follow.
    SpawnTriggered {
        /// New position.
        cell: Cell,
        /// The claimed spawn, now dead.
        spawn: SpawnPoint,
        /// Enemies to fight.
        pack: Vec<EnemyInstance>,
    },
}

impl MoveOutcome {
    /// Check if the move was refused.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, MoveOutcome::Rejected(_))
    }

    /// Zone and cell of the player after the move, if it was accepted.
    #[must_use]
    pub const fn position(&self, current_zone: ZoneCoord) -> Option<(ZoneCoord, Cell)> {
        match self {
            MoveOutcome::Rejected(_) => None,
            MoveOutcome::ZoneChanged { zone, cell } => Some((*zone, *cell)),
            MoveOutcome::Moved { cell }
            | MoveOutcome::ShopEntered { cell }
            | MoveOutcome::SpawnTriggered { cell, .. } => Some((current_zone, *cell)),
        }
    }
}

/// Check that a cell of a zone can be stepped on.
///
/// # Errors
///
/// Returns the rejection reason for cells outside the grid or on
/// wall, tree and house tiles.
pub fn validate_target(zone: &ZoneInfo, cell: Cell) -> Result<TileType, MoveRejection> {
    let tile = zone
        .tile(cell)
        .ok_or(MoveRejection::OutOfBounds { cell })?;
    if tile.is_walkable() {
        Ok(tile)
    } else {
        Err(MoveRejection::Blocked { cell, tile })
    }
}

/// Zone and entry cell reached by standing on an edge cell.
///
/// Returns `None` for interior cells.
#[must_use]
pub fn zone_transition(zone: &ZoneInfo, cell: Cell) -> Option<(ZoneCoord, Cell)> {
    let dir = cell.edge()?;
    Some((zone.exits.get(dir), cell.entry_after(dir)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::zone_info;

    #[test]
    fn test_validate_target() {
        let safe = zone_info(ZoneCoord::ORIGIN);
        assert_eq!(validate_target(&safe, Cell::new(2, 2)), Ok(TileType::Ground));
        assert_eq!(validate_target(&safe, Cell::new(7, 7)), Ok(TileType::Shop));
        assert_eq!(
            validate_target(&safe, Cell::new(4, 4)),
            Err(MoveRejection::Blocked {
                cell: Cell::new(4, 4),
                tile: TileType::House
            })
        );
        assert_eq!(
            validate_target(&safe, Cell::new(0, 3)),
            Err(MoveRejection::Blocked {
                cell: Cell::new(0, 3),
                tile: TileType::Wall
            })
        );
        assert_eq!(
            validate_target(&safe, Cell::new(18, 3)),
            Err(MoveRejection::OutOfBounds { cell: Cell::new(18, 3) })
        );
    }

    #[test]
    fn test_transitions_from_portals() {
        let safe = zone_info(ZoneCoord::ORIGIN);
        assert_eq!(
            zone_transition(&safe, Cell::new(9, 0)),
            Some((ZoneCoord::new(0, 1).unwrap(), Cell::new(9, 16)))
        );
        assert_eq!(
            zone_transition(&safe, Cell::new(9, 17)),
            Some((ZoneCoord::new(0, -1).unwrap(), Cell::new(9, 1)))
        );
        assert_eq!(
            zone_transition(&safe, Cell::new(0, 9)),
            Some((ZoneCoord::new(-1, 0).unwrap(), Cell::new(16, 9)))
        );
        assert_eq!(
            zone_transition(&safe, Cell::new(17, 9)),
            Some((ZoneCoord::new(1, 0).unwrap(), Cell::new(1, 9)))
        );
        assert_eq!(zone_transition(&safe, Cell::new(5, 5)), None);
    }

    #[test]
    fn test_outcome_position() {
        let zone = ZoneCoord::ORIGIN;
        let moved = MoveOutcome::Moved { cell: Cell::new(3, 3) };
        assert_eq!(moved.position(zone), Some((zone, Cell::new(3, 3))));
        let rejected = MoveOutcome::Rejected(MoveRejection::OutOfBounds { cell: Cell::new(-1, 0) });
        assert!(rejected.is_rejected());
        assert_eq!(rejected.position(zone), None);
    }

    #[test]
    fn test_rejection_display() {
        let rejection = MoveRejection::Blocked {
            cell: Cell::new(2, 3),
            tile: TileType::Tree,
        };
        assert_eq!(rejection.to_string(), "cell (2, 3) is blocked by tree");
        assert_eq!(MoveRejection::OutOfLives.to_string(), "no lives left");
    }

    #[test]
    fn test_request_lives_serde() {
        let request = MoveRequest::new(ZoneCoord::ORIGIN, Cell::new(5, 5), Cell::new(5, 6));
        let json = serde_json::to_value(request).unwrap();
        assert!(json.get("lives").is_none());

        let parsed: MoveRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(request.with_lives(2).lives, Some(2));

        let rejected = MoveOutcome::Rejected(MoveRejection::OutOfLives);
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["kind"], "rejected");
        assert_eq!(json["reason"], "out_of_lives");
    }
}
