//! Rarity tiers of enemies and equipment.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Rarity of a generated enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyRarity {
    /// Plain enemy.
    Normal,
    /// Tougher variant.
    Strong,
    /// Pack leader.
    Boss,
    /// Very rare elite.
    Legend,
}

/// Cumulative roll table: each tier with its probability, in roll order.
pub const ENEMY_RARITY_CHANCES: [(EnemyRarity, f64); 4] = [
    (EnemyRarity::Normal, 0.80),
    (EnemyRarity::Strong, 0.15),
    (EnemyRarity::Boss, 0.04),
    (EnemyRarity::Legend, 0.01),
];

impl EnemyRarity {
    /// Every tier, most common first.
    pub const ALL: [EnemyRarity; 4] = [
        EnemyRarity::Normal,
        EnemyRarity::Strong,
        EnemyRarity::Boss,
        EnemyRarity::Legend,
    ];

    /// Map a uniform roll in `[0, 1)` to a tier through the cumulative table.
    ///
    /// A roll past the end of the table (only possible through float
    /// rounding) falls back to [`EnemyRarity::Normal`].
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        let mut cumulative = 0.0;
        for (rarity, chance) in ENEMY_RARITY_CHANCES {
            cumulative += chance;
            if roll <= cumulative {
                return rarity;
            }
        }
        EnemyRarity::Normal
    }

    /// Roll a tier.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen_range(0.0..1.0))
    }

    /// Stat multiplier applied on top of level scaling.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            EnemyRarity::Normal => 1.0,
            EnemyRarity::Strong => 1.4,
            EnemyRarity::Boss => 1.8,
            EnemyRarity::Legend => 2.2,
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EnemyRarity::Normal => "normal",
            EnemyRarity::Strong => "strong",
            EnemyRarity::Boss => "boss",
            EnemyRarity::Legend => "legend",
        }
    }
}

impl fmt::Display for EnemyRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnemyRarity {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::UnknownRarity(s.to_string()))
    }
}

/// Rarity of an equipment item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    /// Starting gear.
    #[default]
    Basic,
    /// Slightly better than basic.
    Uncommon,
    /// Rare.
    Rare,
    /// Epic.
    Epic,
    /// Legendary.
    Legendary,
    /// Mythic.
    Mythic,
    /// Top tier, same stats as mythic.
    Ascended,
}

/// Cumulative roll table for item drops, in roll order.
pub const ITEM_RARITY_CHANCES: [(ItemRarity, f64); 7] = [
    (ItemRarity::Basic, 0.50),
    (ItemRarity::Uncommon, 0.25),
    (ItemRarity::Rare, 0.15),
    (ItemRarity::Epic, 0.07),
    (ItemRarity::Legendary, 0.02),
    (ItemRarity::Mythic, 0.009),
    (ItemRarity::Ascended, 0.001),
];

impl ItemRarity {
    /// Every tier, lowest first.
    pub const ALL: [ItemRarity; 7] = [
        ItemRarity::Basic,
        ItemRarity::Uncommon,
        ItemRarity::Rare,
        ItemRarity::Epic,
        ItemRarity::Legendary,
        ItemRarity::Mythic,
        ItemRarity::Ascended,
    ];

    /// Multiplier applied to an item's base stats.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            ItemRarity::Basic => 1.0,
            ItemRarity::Uncommon => 1.8,
            ItemRarity::Rare => 3.0,
            ItemRarity::Epic => 5.0,
            ItemRarity::Legendary => 8.0,
            ItemRarity::Mythic | ItemRarity::Ascended => 10.0,
        }
    }

    /// Map a uniform roll in `[0, 1)` to a tier through [`ITEM_RARITY_CHANCES`].
    ///
    /// Falls back to [`ItemRarity::Basic`] past the end of the table.
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        let mut cumulative = 0.0;
        for (rarity, chance) in ITEM_RARITY_CHANCES {
            cumulative += chance;
            if roll <= cumulative {
                return rarity;
            }
        }
        ItemRarity::Basic
    }

    /// Roll a drop tier.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen_range(0.0..1.0))
    }

    /// Lowercase tier name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ItemRarity::Basic => "basic",
            ItemRarity::Uncommon => "uncommon",
            ItemRarity::Rare => "rare",
            ItemRarity::Epic => "epic",
            ItemRarity::Legendary => "legendary",
            ItemRarity::Mythic => "mythic",
            ItemRarity::Ascended => "ascended",
        }
    }
}

impl fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemRarity {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::UnknownRarity(s.to_string()))
    }
}
