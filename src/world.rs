//! World topology for Loco.
//!
//! The world is a torus of zones with coordinates in `[-10, 10]` on each axis.
//! Every zone is an 18×18 tile grid derived purely from its coordinates:
//! - Ring distance from the origin sets the zone level
//! - Exits wrap around the ring edges
//! - Tiles come from a seeded, bit-exact generator
//! - The origin zone is a fixed safe town

mod cache;
mod grid;
mod mapgen;
mod rng;
mod tile;
mod zone;

use serde::Serialize;
use tracing::debug;

pub use cache::{CacheStats, ZoneCache, DEFAULT_CACHE_CAPACITY};
pub use grid::{Cell, ZoneGrid, GRID_SIZE, PORTAL_INDEX};
pub use mapgen::{enemy_pack_count, generate_tiles, shop_count, tree_density};
pub use rng::{seed_from_key, zone_seed, ZoneRng};
pub use tile::TileType;
pub use zone::{wrap_axis, Direction, Exits, ZoneCoord, RING_RADIUS};

/// Everything a client needs to know about one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    /// Zone coordinates.
    pub coord: ZoneCoord,
    /// Difficulty level.
    pub level: u32,
    /// Neighbouring zones.
    pub exits: Exits,
    /// Tile grid.
    pub tiles: ZoneGrid,
}

impl ZoneInfo {
    /// Tile at a cell, or `None` outside the grid.
    #[must_use]
    pub const fn tile(&self, cell: Cell) -> Option<TileType> {
        self.tiles.get(cell)
    }
}

/// Describe a zone: level, exits and tiles.
///
/// Pure and deterministic; calling it twice with the same coordinates yields
/// identical results.
#[must_use]
pub fn zone_info(coord: ZoneCoord) -> ZoneInfo {
    let tiles = generate_tiles(coord);
    debug!(
        zone = %coord,
        level = coord.level(),
        trees = tiles.count(TileType::Tree),
        packs = tiles.count(TileType::Enemy),
        "generated zone"
    );
    ZoneInfo {
        coord,
        level: coord.level(),
        exits: coord.exits(),
        tiles,
    }
}
