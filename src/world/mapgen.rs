//! Deterministic tile generation for zones.
//!
//! A zone's grid is a pure function of its coordinates: the same zone always
//! regenerates the same tiles, so grids are never stored.

use crate::world::{zone_seed, Cell, TileType, ZoneCoord, ZoneGrid, ZoneRng, GRID_SIZE};

/// Top-left corners of the 2×2 house blocks in the safe zone.
const SAFE_HOUSE_BLOCKS: [(i32, i32); 8] = [
    (4, 4),
    (7, 4),
    (10, 4),
    (4, 7),
    (10, 7),
    (4, 10),
    (7, 10),
    (10, 10),
];

/// Left end of the 1×2 shop strip in the safe zone.
const SAFE_SHOP: (i32, i32) = (7, 7);

/// Chance that a freshly planted tree grows a cluster.
const TREE_CLUSTER_CHANCE: f64 = 0.65;

/// Chance that each neighbour of a cluster seed becomes a tree.
const TREE_NEIGHBOR_CHANCE: f64 = 0.45;

/// Largest valid interior index.
const INNER_MAX: i32 = GRID_SIZE as i32 - 2;

/// Generate the tile grid of a zone.
#[must_use]
pub fn generate_tiles(zone: ZoneCoord) -> ZoneGrid {
    let mut grid = ZoneGrid::bordered();

    if zone.is_safe() {
        place_safe_layout(&mut grid);
        grid.reassert_border();
        return grid;
    }

    let mut rng = ZoneRng::new(zone_seed(zone.x(), zone.y()));

    place_trees(&mut grid, &mut rng, tree_density(zone.ring_distance()));
    place_shops(&mut grid, &mut rng, shop_count(zone));
    place_enemy_packs(&mut grid, &mut rng, enemy_pack_count(zone.level()));

    grid.reassert_border();
    grid
}

/// Tree density tier by ring distance.
#[must_use]
pub const fn tree_density(ring: u32) -> u32 {
    match ring {
        0..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

/// Number of shop placement attempts in a zone.
#[must_use]
pub const fn shop_count(zone: ZoneCoord) -> u32 {
    let mut count = 0;
    if zone.x() % 5 == 0 && zone.y() % 5 == 0 {
        count = 1;
    }
    if zone.ring_distance() >= 7 && zone.x() % 4 == 0 && zone.y() % 4 == 0 && count < 2 {
        count = 2;
    }
    count
}

/// Number of enemy pack placement attempts for a zone level.
#[must_use]
pub const fn enemy_pack_count(level: u32) -> u32 {
    match level {
        0..=9 => 1,
        10..=19 => 2,
        20..=39 => 3,
        _ => 4,
    }
}

/// Houses and the market shop of the safe zone. No trees, no enemies.
fn place_safe_layout(grid: &mut ZoneGrid) {
    for (sx, sy) in SAFE_HOUSE_BLOCKS {
        for dy in 0..2 {
            for dx in 0..2 {
                grid.set(Cell::new(sx + dx, sy + dy), TileType::House);
            }
        }
    }

    let (sx, sy) = SAFE_SHOP;
    for dx in 0..2 {
        grid.set(Cell::new(sx + dx, sy), TileType::Shop);
    }
}

/// Scatter trees over interior ground, some in small clusters.
fn place_trees(grid: &mut ZoneGrid, rng: &mut ZoneRng, density: u32) {
    if density == 0 {
        return;
    }

    let attempts = 200 + density * 60;
    let target = 12 + density * 10;
    let mut placed = 0;

    for _ in 0..attempts {
        if placed >= target {
            break;
        }

        let x = rng.range_inclusive(1, INNER_MAX);
        let y = rng.range_inclusive(1, INNER_MAX);
        let cell = Cell::new(x, y);

        // Never overwrite portals, shops or anything else placed earlier
        if !grid.is_ground(cell) {
            continue;
        }

        grid.set(cell, TileType::Tree);
        placed += 1;

        if placed < target && rng.chance(TREE_CLUSTER_CHANCE) {
            for (dx, dy) in [(1, 0), (0, 1), (-1, 0), (0, -1)] {
                let neighbor = Cell::new(x + dx, y + dy);
                let interior = (1..=INNER_MAX).contains(&neighbor.x)
                    && (1..=INNER_MAX).contains(&neighbor.y);
                if interior && grid.is_ground(neighbor) && rng.chance(TREE_NEIGHBOR_CHANCE) {
                    grid.set(neighbor, TileType::Tree);
                    placed += 1;
                    if placed >= target {
                        break;
                    }
                }
            }
        }
    }
}

/// Place 1×2 shop strips on free 2×2 ground areas.
fn place_shops(grid: &mut ZoneGrid, rng: &mut ZoneRng, count: u32) {
    for _ in 0..count {
        let x = rng.range_inclusive(2, GRID_SIZE as i32 - 4);
        let y = rng.range_inclusive(2, GRID_SIZE as i32 - 4);

        let free = (0..2).all(|dy| (0..2).all(|dx| grid.is_ground(Cell::new(x + dx, y + dy))));
        if !free {
            continue;
        }

        for dx in 0..2 {
            grid.set(Cell::new(x + dx, y), TileType::Shop);
        }
    }
}

/// Mark enemy packs: an enemy centre surrounded by a 3×3 enemy zone.
fn place_enemy_packs(grid: &mut ZoneGrid, rng: &mut ZoneRng, packs: u32) {
    for _ in 0..packs {
        let cx = rng.range_inclusive(4, GRID_SIZE as i32 - 5);
        let cy = rng.range_inclusive(4, GRID_SIZE as i32 - 5);
        let centre = Cell::new(cx, cy);

        // Not on top of shops, trees or another pack
        if !grid.is_ground(centre) {
            continue;
        }

        for y in cy - 1..=cy + 1 {
            for x in cx - 1..=cx + 1 {
                let cell = Cell::new(x, y);
                if grid.is_ground(cell) {
                    grid.set(cell, TileType::EnemyZone);
                }
            }
        }
        grid.set(centre, TileType::Enemy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(x: i32, y: i32) -> ZoneCoord {
        ZoneCoord::new(x, y).unwrap()
    }

    #[test]
    fn test_generation_determinism() {
        for (x, y) in [(1, 0), (-4, 7), (10, -10), (3, 3)] {
            assert_eq!(generate_tiles(zone(x, y)), generate_tiles(zone(x, y)));
        }
    }

    #[test]
    fn test_different_zones_differ() {
        assert_ne!(generate_tiles(zone(2, 3)), generate_tiles(zone(3, 2)));
    }

    #[test]
    fn test_safe_zone_layout() {
        let grid = generate_tiles(ZoneCoord::ORIGIN);
        assert_eq!(grid.count(TileType::Tree), 0);
        assert_eq!(grid.count(TileType::Enemy), 0);
        assert_eq!(grid.count(TileType::EnemyZone), 0);
        assert_eq!(grid.count(TileType::Shop), 2);
        assert_eq!(grid.count(TileType::House), 32);
        assert_eq!(grid.get(Cell::new(7, 7)), Some(TileType::Shop));
        assert_eq!(grid.get(Cell::new(8, 7)), Some(TileType::Shop));
        assert_eq!(grid.get(Cell::new(7, 8)), Some(TileType::Ground));
        assert_eq!(grid.get(Cell::new(4, 4)), Some(TileType::House));
    }

    #[test]
    fn test_border_survives_generation() {
        for (x, y) in [(0, 1), (-9, 9), (6, -2)] {
            let grid = generate_tiles(zone(x, y));
            for i in 0..GRID_SIZE as i32 {
                for cell in [
                    Cell::new(i, 0),
                    Cell::new(i, GRID_SIZE as i32 - 1),
                    Cell::new(0, i),
                    Cell::new(GRID_SIZE as i32 - 1, i),
                ] {
                    let tile = grid.get(cell).unwrap();
                    assert!(
                        matches!(tile, TileType::Wall | TileType::Portal),
                        "border cell {cell} of zone ({x}, {y}) is {tile}"
                    );
                }
            }
            assert_eq!(grid.count(TileType::Portal), 4);
        }
    }

    #[test]
    fn test_every_wild_zone_has_trees() {
        let grid = generate_tiles(zone(1, 1));
        assert!(grid.count(TileType::Tree) > 0);
    }

    #[test]
    fn test_enemy_markers_are_surrounded() {
        let grid = generate_tiles(zone(5, -5));
        for centre in grid.cells_of(TileType::Enemy) {
            assert!((4..=13).contains(&centre.x));
            assert!((4..=13).contains(&centre.y));
        }
        // At least one pack attempt lands on ground in almost every zone,
        // and enemy-zone tiles only ever appear next to a pack centre.
        for cell in grid.cells_of(TileType::EnemyZone) {
            let near_enemy = grid
                .cells_of(TileType::Enemy)
                .any(|centre| centre.chebyshev(cell) <= 1);
            assert!(near_enemy, "stray enemy zone at {cell}");
        }
    }

    #[test]
    fn test_density_tiers() {
        assert_eq!(tree_density(1), 1);
        assert_eq!(tree_density(2), 1);
        assert_eq!(tree_density(3), 2);
        assert_eq!(tree_density(6), 3);
        assert_eq!(tree_density(9), 4);
        assert_eq!(tree_density(10), 4);
    }

    #[test]
    fn test_pack_count_by_level() {
        assert_eq!(enemy_pack_count(1), 1);
        assert_eq!(enemy_pack_count(10), 2);
        assert_eq!(enemy_pack_count(20), 3);
        assert_eq!(enemy_pack_count(30), 3);
        assert_eq!(enemy_pack_count(40), 4);
        assert_eq!(enemy_pack_count(90), 4);
    }

    #[test]
    fn test_shop_count_rules() {
        assert_eq!(shop_count(zone(5, -5)), 1);
        assert_eq!(shop_count(zone(1, 5)), 0);
        assert_eq!(shop_count(zone(8, 8)), 2);
        assert_eq!(shop_count(zone(4, 4)), 0);
        assert_eq!(shop_count(zone(-8, 0)), 2);
    }
}
