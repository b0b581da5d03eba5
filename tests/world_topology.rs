//! Integration tests for world topology and zone generation.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use loco::world::{
    zone_info, Cell, Direction, TileType, ZoneCache, ZoneCoord, GRID_SIZE, PORTAL_INDEX,
};
use loco::ZoneKeyError;

fn all_zones() -> impl Iterator<Item = ZoneCoord> {
    (-10..=10).flat_map(|x| (-10..=10).map(move |y| ZoneCoord::new(x, y).unwrap()))
}

#[test]
fn test_every_zone_has_open_portals() {
    for zone in all_zones() {
        let info = zone_info(zone);
        let last = i32::try_from(GRID_SIZE - 1).unwrap();
        let mid = i32::try_from(PORTAL_INDEX).unwrap();
        for cell in [Cell::new(mid, 0), Cell::new(mid, last), Cell::new(0, mid), Cell::new(last, mid)] {
            assert_eq!(info.tile(cell), Some(TileType::Portal), "zone {zone} cell {cell}");
        }
        assert_eq!(info.tiles.count(TileType::Portal), 4, "zone {zone}");
    }
}

#[test]
fn test_exits_are_symmetric() {
    for zone in all_zones() {
        for dir in Direction::ALL {
            let next = zone.neighbor(dir);
            assert_eq!(next.neighbor(dir.opposite()), zone, "{zone} {dir:?}");
        }
    }
}

#[test]
fn test_ring_edges_wrap() {
    let east_edge = ZoneCoord::new(10, 3).unwrap();
    assert_eq!(east_edge.exits().east, ZoneCoord::new(-10, 3).unwrap());
    let south_edge = ZoneCoord::new(-4, -10).unwrap();
    assert_eq!(south_edge.exits().south, ZoneCoord::new(-4, 10).unwrap());
}

#[test]
fn test_levels_by_ring() {
    assert_eq!(ZoneCoord::ORIGIN.level(), 0);
    assert_eq!(ZoneCoord::new(1, -1).unwrap().level(), 1);
    assert_eq!(ZoneCoord::new(-2, 0).unwrap().level(), 10);
    assert_eq!(ZoneCoord::new(3, -7).unwrap().level(), 60);
    assert_eq!(ZoneCoord::new(10, 10).unwrap().level(), 90);
}

#[test]
fn test_zone_key_round_trip() {
    for key in ["0-0", "3--7", "-2-4", "-10--10"] {
        let zone: ZoneCoord = key.parse().unwrap();
        assert_eq!(zone.to_string(), key);
    }
    assert!(matches!("11-0".parse::<ZoneCoord>(), Err(ZoneKeyError::OutOfRange { .. })));
    assert!(matches!("abc".parse::<ZoneCoord>(), Err(ZoneKeyError::Malformed(_))));
}

#[test]
fn test_generation_is_deterministic() {
    for zone in all_zones().step_by(17) {
        assert_eq!(zone_info(zone), zone_info(zone));
    }
}

#[test]
fn test_safe_zone_has_no_enemies() {
    let info = zone_info(ZoneCoord::ORIGIN);
    assert_eq!(info.tiles.count(TileType::Enemy), 0);
    assert_eq!(info.tiles.count(TileType::EnemyZone), 0);
    assert!(info.tiles.count(TileType::Shop) >= 1);
}

#[test]
fn test_enemy_packs_sit_on_walkable_tiles() {
    for zone in all_zones().filter(|z| !z.is_safe()) {
        let info = zone_info(zone);
        for cell in info.tiles.cells_of(TileType::Enemy) {
            assert!(cell.edge().is_none(), "pack on edge in {zone}");
        }
    }
}

#[test]
fn test_cache_serves_same_zone() {
    let cache = ZoneCache::new(4);
    let zone = ZoneCoord::new(2, 2).unwrap();
    let first = cache.get(zone);
    let second = cache.get(zone);
    assert_eq!(*first, *second);
    assert_eq!(*first, zone_info(zone));
    assert_eq!(cache.stats().hits, 1);
}
