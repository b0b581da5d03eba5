//! Enemy pack generation.

// Stat scaling truncates floats back to integers on purpose
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::CombatStats;
use crate::encounter::{ArchetypeCatalog, EnemyArchetype, EnemyRarity};
use crate::world::seed_from_key;

/// Per-level growth of enemy hit points.
pub const ENEMY_HP_GROWTH: f64 = 1.06;
/// Per-level growth of enemy attack.
pub const ENEMY_ATTACK_GROWTH: f64 = 1.05;
/// Per-level growth of enemy defense.
pub const ENEMY_DEFENSE_GROWTH: f64 = 1.04;

/// Largest number of enemies in one pack.
pub const MAX_PACK_SIZE: usize = 4;

/// One enemy of a generated pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyInstance {
    /// Name of the archetype the enemy was built from.
    pub archetype: String,
    /// Enemy level, equal to the zone level.
    pub level: u32,
    /// Rarity tier.
    pub rarity: EnemyRarity,
    /// Final hit points.
    pub hp: u32,
    /// Final attack.
    pub attack: u32,
    /// Final defense.
    pub defense: u32,
    /// Speed, copied from the archetype.
    pub speed: u32,
}

impl EnemyInstance {
    /// Scale an archetype to a level and rarity.
    #[must_use]
    pub fn new(archetype: &EnemyArchetype, level: u32, rarity: EnemyRarity) -> Self {
        let stats = enemy_stats(archetype, level, rarity);
        Self {
            archetype: archetype.name.clone(),
            level,
            rarity,
            hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
        }
    }

    /// Final stats as a stat block.
    #[must_use]
    pub const fn stats(&self) -> CombatStats {
        CombatStats::new(self.hp, self.attack, self.defense, self.speed)
    }
}

/// Final stats of an enemy: `floor(base * growth^(level - 1) * multiplier)`.
///
/// Speed is never scaled. Level 0 scales like level 1.
#[must_use]
pub fn enemy_stats(archetype: &EnemyArchetype, level: u32, rarity: EnemyRarity) -> CombatStats {
    let exponent = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    let multiplier = rarity.multiplier();
    let scale = |base: u32, growth: f64| -> u32 {
        (f64::from(base) * growth.powi(exponent) * multiplier).floor() as u32
    };

    CombatStats {
        hp: scale(archetype.base_hp, ENEMY_HP_GROWTH),
        attack: scale(archetype.base_attack, ENEMY_ATTACK_GROWTH),
        defense: scale(archetype.base_defense, ENEMY_DEFENSE_GROWTH),
        speed: archetype.base_speed,
    }
}

/// Generate a pack from a numeric seed.
#[must_use]
pub fn generate_pack(zone_level: u32, catalog: &ArchetypeCatalog, seed: u64) -> Vec<EnemyInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_pack_with(zone_level, catalog, &mut rng)
}

/// Generate a pack seeded by an arbitrary key, e.g. zone, cell and timestamp.
#[must_use]
pub fn generate_pack_for_key(
    zone_level: u32,
    catalog: &ArchetypeCatalog,
    key: &str,
) -> Vec<EnemyInstance> {
    generate_pack(zone_level, catalog, seed_from_key(key))
}

/// Generate a pack of 1 to 4 enemies using the given RNG.
///
/// Returns an empty pack for level 0 or an empty catalog.
pub fn generate_pack_with<R: Rng + ?Sized>(
    zone_level: u32,
    catalog: &ArchetypeCatalog,
    rng: &mut R,
) -> Vec<EnemyInstance> {
    if zone_level == 0 || catalog.is_empty() {
        return Vec::new();
    }

    let size = rng.gen_range(1..=MAX_PACK_SIZE);
    let pack: Vec<EnemyInstance> = (0..size)
        .filter_map(|_| {
            let archetype = catalog.archetypes().choose(rng)?;
            let rarity = EnemyRarity::roll(rng);
            Some(EnemyInstance::new(archetype, zone_level, rarity))
        })
        .collect();

    debug!(level = zone_level, size = pack.len(), "generated enemy pack");
    pack
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> EnemyArchetype {
        EnemyArchetype::new("Goblin", CombatStats::new(60, 10, 4, 2))
    }

    #[test]
    fn test_level_one_normal_is_base() {
        let stats = enemy_stats(&goblin(), 1, EnemyRarity::Normal);
        assert_eq!(stats, CombatStats::new(60, 10, 4, 2));
    }

    #[test]
    fn test_scaling_truncates() {
        // 60 * 1.06^9 * 1.4 = 141.9.., 10 * 1.05^9 * 1.4 = 21.7.., 4 * 1.04^9 * 1.4 = 7.97..
        let stats = enemy_stats(&goblin(), 10, EnemyRarity::Strong);
        assert_eq!(stats, CombatStats::new(141, 21, 7, 2));
    }

    #[test]
    fn test_speed_not_scaled() {
        let stats = enemy_stats(&goblin(), 90, EnemyRarity::Legend);
        assert_eq!(stats.speed, 2);
        assert!(stats.hp > 60);
    }

    #[test]
    fn test_pack_size_and_level() {
        let catalog = ArchetypeCatalog::default();
        for seed in 0..200 {
            let pack = generate_pack(20, &catalog, seed);
            assert!((1..=MAX_PACK_SIZE).contains(&pack.len()));
            for enemy in &pack {
                assert_eq!(enemy.level, 20);
                assert!(catalog.get(&enemy.archetype).is_some());
            }
        }
    }

    #[test]
    fn test_pack_is_seed_deterministic() {
        let catalog = ArchetypeCatalog::default();
        assert_eq!(
            generate_pack(10, &catalog, 7),
            generate_pack(10, &catalog, 7)
        );
        assert_eq!(
            generate_pack_for_key(10, &catalog, "2-3:9:9:1700000000"),
            generate_pack_for_key(10, &catalog, "2-3:9:9:1700000000")
        );
    }

    #[test]
    fn test_empty_cases() {
        assert!(generate_pack(0, &ArchetypeCatalog::default(), 1).is_empty());
        assert!(generate_pack(5, &ArchetypeCatalog::empty(), 1).is_empty());
    }

    #[test]
    fn test_pack_sizes_all_occur() {
        let catalog = ArchetypeCatalog::default();
        let mut seen = [false; MAX_PACK_SIZE];
        for seed in 0..500 {
            seen[generate_pack(1, &catalog, seed).len() - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
