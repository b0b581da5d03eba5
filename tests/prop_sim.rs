//! Property-based tests for the simulation core.
//!
//! Run with: cargo test --release prop_sim

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration};
use proptest::prelude::*;

use loco::combat::{resolve, Battler, CombatStats, Outcome, Role, Side};
use loco::encounter::{generate_pack, ArchetypeCatalog, EnemyRarity, MAX_PACK_SIZE};
use loco::lives::regen;
use loco::world::{wrap_axis, zone_info, Cell, ZoneCoord, RING_RADIUS};

fn role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Tank),
        Just(Role::Dps),
        Just(Role::Apprentice),
        Just(Role::Healer),
    ]
}

fn battler(side: Side) -> impl Strategy<Value = Battler> {
    (role(), 1u32..500, 0u32..80, 0u32..40, 0u32..20, 0u32..20).prop_map(
        move |(role, hp, attack, defense, speed, mana)| {
            Battler::new(
                format!("{role}"),
                role,
                side,
                CombatStats::new(hp, attack, defense, speed),
                mana,
            )
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Wrapping always lands on the ring and is idempotent.
    #[test]
    fn prop_wrap_axis_in_range(v in -1000i32..1000) {
        let w = wrap_axis(v);
        prop_assert!((-RING_RADIUS..=RING_RADIUS).contains(&w));
        prop_assert_eq!(wrap_axis(w), w);
        prop_assert_eq!((i64::from(v) - i64::from(w)).rem_euclid(21), 0);
    }

    /// Display and parse agree for every zone.
    #[test]
    fn prop_zone_key_round_trip(x in -10i32..=10, y in -10i32..=10) {
        let zone = ZoneCoord::new(x, y).unwrap();
        let parsed: ZoneCoord = zone.to_string().parse().unwrap();
        prop_assert_eq!(parsed, zone);
    }

    /// Portals always lead somewhere and lead back.
    #[test]
    fn prop_portal_transitions_return(x in -10i32..=10, y in -10i32..=10) {
        let zone = ZoneCoord::new(x, y).unwrap();
        let info = zone_info(zone);
        for dir in loco::world::Direction::ALL {
            let next = info.exits.get(dir);
            prop_assert_eq!(zone_info(next).exits.get(dir.opposite()), zone);
        }
        prop_assert!(info.tile(Cell::new(9, 9)).is_some());
    }

    /// Battles always end within the turn limit with a consistent outcome.
    #[test]
    fn prop_battle_terminates(
        players in prop::collection::vec(battler(Side::Player), 0..4),
        enemies in prop::collection::vec(battler(Side::Enemy), 0..4),
    ) {
        let report = resolve(players, enemies);
        prop_assert!(report.turns >= 1 && report.turns <= 50);

        let players_alive = report.players.iter().any(|b| b.alive);
        let enemies_alive = report.enemies.iter().any(|b| b.alive);
        match report.outcome {
            Outcome::Lose => prop_assert!(!players_alive),
            Outcome::Win => prop_assert!(players_alive && !enemies_alive),
            Outcome::Draw => prop_assert!(players_alive && enemies_alive),
        }
        for unit in report.players.iter().chain(&report.enemies) {
            prop_assert!(unit.hp <= unit.max_hp);
            prop_assert!(unit.mana <= unit.max_mana);
            prop_assert_eq!(unit.alive, unit.hp > 0);
        }
    }

    /// Packs are reproducible and sized by the pack limit.
    #[test]
    fn prop_pack_deterministic(level in 1u32..100, seed in any::<u64>()) {
        let catalog = ArchetypeCatalog::default();
        let pack = generate_pack(level, &catalog, seed);
        prop_assert!(!pack.is_empty() && pack.len() <= MAX_PACK_SIZE);
        prop_assert_eq!(&pack, &generate_pack(level, &catalog, seed));
        for enemy in &pack {
            prop_assert_eq!(enemy.level, level);
            prop_assert!(catalog.get(&enemy.archetype).is_some());
        }
    }

    /// Every roll maps to a tier, and low rolls are normal.
    #[test]
    fn prop_rarity_roll_total(roll in 0.0f64..1.0) {
        let rarity = EnemyRarity::from_roll(roll);
        if roll <= 0.8 {
            prop_assert_eq!(rarity, EnemyRarity::Normal);
        } else {
            prop_assert_ne!(rarity, EnemyRarity::Normal);
        }
    }

    /// Regeneration never exceeds the cap and never moves the tick past now.
    #[test]
    fn prop_regen_bounded(lives in 0u32..5, max in 1u32..5, elapsed in 0i64..100_000) {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let now = start + Duration::seconds(elapsed);
        let tick = regen(Some(start), now, lives, max, Duration::seconds(600));
        prop_assert!(tick.lives <= max.max(lives));
        prop_assert!(tick.last_tick <= now);
        prop_assert!(tick.seconds_to_next <= 600);
        if tick.lives >= max {
            prop_assert_eq!(tick.seconds_to_next, 0);
        }
    }
}
