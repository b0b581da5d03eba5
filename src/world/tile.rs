//! Tile types of a zone grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TileError;

/// Type of terrain or feature on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TileType {
    /// Open ground.
    Ground = 0,
    /// Border wall - impassable.
    Wall = 1,
    /// Tree - impassable.
    Tree = 2,
    /// Shop entrance - walkable, opens the shop.
    Shop = 3,
    /// House - impassable.
    House = 4,
    /// Edge portal leading to the neighbouring zone.
    Portal = 5,
    /// Centre of an enemy pack, the spawn point itself.
    Enemy = 6,
    /// Area around an enemy pack.
    EnemyZone = 7,
}

impl TileType {
    /// Every tile type.
    pub const ALL: [TileType; 8] = [
        TileType::Ground,
        TileType::Wall,
        TileType::Tree,
        TileType::Shop,
        TileType::House,
        TileType::Portal,
        TileType::Enemy,
        TileType::EnemyZone,
    ];

    /// Check if a player may stand on this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, TileType::Wall | TileType::Tree | TileType::House)
    }

    /// Check if stepping on this tile may start an encounter.
    #[must_use]
    pub const fn is_hostile(self) -> bool {
        matches!(self, TileType::Enemy | TileType::EnemyZone)
    }

    /// Single-character map symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            TileType::Ground => 'G',
            TileType::Wall => 'W',
            TileType::Tree => 'T',
            TileType::Shop => 'S',
            TileType::House => 'H',
            TileType::Portal => 'P',
            TileType::Enemy => 'E',
            TileType::EnemyZone => 'Z',
        }
    }

    /// Lowercase name, as exposed to clients.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TileType::Ground => "ground",
            TileType::Wall => "wall",
            TileType::Tree => "tree",
            TileType::Shop => "shop",
            TileType::House => "house",
            TileType::Portal => "portal",
            TileType::Enemy => "enemy",
            TileType::EnemyZone => "enemy_zone",
        }
    }
}

impl TryFrom<char> for TileType {
    type Error = TileError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        TileType::ALL
            .into_iter()
            .find(|t| t.symbol() == c)
            .ok_or(TileError(c))
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
