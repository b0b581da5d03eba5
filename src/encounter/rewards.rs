//! Experience and orb rewards for a won battle.

use serde::{Deserialize, Serialize};

use crate::encounter::{EnemyInstance, EnemyRarity};

/// Shop coin value of one bronze orb.
pub const BRONZE_COIN_VALUE: u64 = 1;
/// Shop coin value of one silver orb.
pub const SILVER_COIN_VALUE: u64 = 15;
/// Shop coin value of one gold orb.
pub const GOLD_COIN_VALUE: u64 = 100;

/// Rewards granted for defeating a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleRewards {
    /// Experience points.
    pub xp: u64,
    /// Bronze orbs.
    pub orbs_bronze: u32,
    /// Silver orbs.
    pub orbs_silver: u32,
    /// Gold orbs.
    pub orbs_gold: u32,
}

impl BattleRewards {
    /// Total value of the orbs in shop coins.
    #[must_use]
    pub const fn coin_value(&self) -> u64 {
        self.orbs_bronze as u64 * BRONZE_COIN_VALUE
            + self.orbs_silver as u64 * SILVER_COIN_VALUE
            + self.orbs_gold as u64 * GOLD_COIN_VALUE
    }
}

/// Sum the rewards for every enemy of a defeated pack.
///
/// Base XP per enemy is `20 + 5 * level`, scaled by rarity and truncated.
#[must_use]
pub fn calculate_rewards(enemies: &[EnemyInstance]) -> BattleRewards {
    enemies.iter().fold(BattleRewards::default(), |mut total, enemy| {
        let base_xp = 20 + 5 * u64::from(enemy.level);
        // Integer forms of the 1.2 / 1.6 / 2.0 multipliers keep truncation exact
        let (xp, bronze, silver, gold) = match enemy.rarity {
            EnemyRarity::Normal => (base_xp, 1, 0, 0),
            EnemyRarity::Strong => (base_xp * 6 / 5, 2, 1, 0),
            EnemyRarity::Boss => (base_xp * 8 / 5, 0, 2, 1),
            EnemyRarity::Legend => (base_xp * 2, 0, 0, 2),
        };
        total.xp += xp;
        total.orbs_bronze += bronze;
        total.orbs_silver += silver;
        total.orbs_gold += gold;
        total
    })
}
