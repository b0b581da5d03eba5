//! Encounter generation.
//!
//! Builds enemy packs for a zone level from an archetype catalog. Every
//! random choice is drawn from a caller-seeded RNG, so a pack is reproducible
//! from its seed or seed key.

mod catalog;
mod pack;
mod rarity;
mod rewards;

pub use catalog::{ArchetypeCatalog, EnemyArchetype};
pub use pack::{
    enemy_stats, generate_pack, generate_pack_for_key, generate_pack_with, EnemyInstance,
    ENEMY_ATTACK_GROWTH, ENEMY_DEFENSE_GROWTH, ENEMY_HP_GROWTH, MAX_PACK_SIZE,
};
pub use rarity::{EnemyRarity, ItemRarity, ENEMY_RARITY_CHANCES, ITEM_RARITY_CHANCES};
pub use rewards::{
    calculate_rewards, BattleRewards, BRONZE_COIN_VALUE, GOLD_COIN_VALUE, SILVER_COIN_VALUE,
};
