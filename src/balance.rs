//! Balance tables for player classes, progression and equipment.
//!
//! All tuning constants for the player side live here. Enemy scaling lives
//! with encounter generation.

// Item stats truncate scaled floats back to integers on purpose
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::{CombatStats, Role};
use crate::encounter::ItemRarity;
use crate::error::RosterError;

/// XP needed to go from level 1 to level 2.
pub const XP_BASE: u64 = 100;

/// Growth of the XP requirement per level.
pub const XP_GROWTH: f64 = 1.10;

/// Level-1 stats and mana of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Fighting stats.
    pub stats: CombatStats,
    /// Maximum mana.
    pub mana: u32,
}

/// Level-1 stats of a class.
#[must_use]
pub const fn class_base(class: Role) -> ClassStats {
    let (stats, mana) = match class {
        Role::Tank => (CombatStats::new(100, 10, 8, 1), 10),
        Role::Dps => (CombatStats::new(90, 14, 4, 1), 10),
        Role::Healer => (CombatStats::new(80, 8, 4, 1), 12),
        Role::Apprentice => (CombatStats::new(95, 11, 5, 1), 10),
    };
    ClassStats { stats, mana }
}

/// Stats a class gains per level above 1.
#[must_use]
pub const fn class_level_gains(class: Role) -> CombatStats {
    match class {
        Role::Tank => CombatStats::new(20, 3, 2, 1),
        Role::Dps => CombatStats::new(5, 5, 1, 1),
        Role::Healer => CombatStats::new(2, 2, 1, 1),
        Role::Apprentice => CombatStats::new(10, 4, 1, 1),
    }
}

/// Class stats at a level: base plus `(level - 1)` times the per-level gains.
///
/// Mana does not grow with level.
#[must_use]
pub const fn class_stats_with_level(class: Role, level: u32) -> ClassStats {
    let base = class_base(class);
    let gains = class_level_gains(class);
    let steps = level.saturating_sub(1);

    ClassStats {
        stats: CombatStats {
            hp: base.stats.hp.saturating_add(gains.hp.saturating_mul(steps)),
            attack: base.stats.attack.saturating_add(gains.attack.saturating_mul(steps)),
            defense: base.stats.defense.saturating_add(gains.defense.saturating_mul(steps)),
            speed: base.stats.speed.saturating_add(gains.speed.saturating_mul(steps)),
        },
        mana: base.mana,
    }
}

/// XP needed to advance from `level` to the next one.
///
/// Starts at 100 and grows by 10% per level, truncated at every step.
#[must_use]
pub fn xp_to_next_level(level: u32) -> u64 {
    (1..level).fold(XP_BASE, |needed, _| (needed as f64 * XP_GROWTH) as u64)
}

/// Level and XP of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Current level, starting at 1.
    pub level: u32,
    /// XP collected towards the next level.
    pub xp: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl Progression {
    /// XP needed for the next level.
    #[must_use]
    pub fn xp_to_next(&self) -> u64 {
        xp_to_next_level(self.level)
    }

    /// Add XP, levelling up as many times as it pays for.
    ///
    /// Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut levels = 0;
        loop {
            let needed = self.xp_to_next();
            if self.xp < needed {
                break levels;
            }
            self.xp -= needed;
            self.level += 1;
            levels += 1;
        }
    }
}

/// Equipment slot of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    /// Head armour.
    Helmet,
    /// Body armour.
    Chest,
    /// Leg armour.
    Pants,
    /// Foot armour.
    Boots,
    /// Primary weapon.
    MainHand,
    /// Secondary weapon or shield.
    OffHand,
    /// Necklace.
    Amulet,
    /// Ring.
    Ring,
    /// Companion.
    Pet,
}

impl EquipmentSlot {
    /// Every slot.
    pub const ALL: [EquipmentSlot; 9] = [
        EquipmentSlot::Helmet,
        EquipmentSlot::Chest,
        EquipmentSlot::Pants,
        EquipmentSlot::Boots,
        EquipmentSlot::MainHand,
        EquipmentSlot::OffHand,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring,
        EquipmentSlot::Pet,
    ];

    /// Stats of a basic item in this slot, before the rarity multiplier.
    #[must_use]
    pub const fn base_stats(self) -> CombatStats {
        match self {
            EquipmentSlot::Helmet
            | EquipmentSlot::Chest
            | EquipmentSlot::Pants
            | EquipmentSlot::Boots => CombatStats::new(10, 0, 4, 0),
            EquipmentSlot::MainHand | EquipmentSlot::OffHand => CombatStats::new(0, 6, 2, 0),
            EquipmentSlot::Amulet | EquipmentSlot::Ring => CombatStats::new(4, 3, 2, 1),
            EquipmentSlot::Pet => CombatStats::new(8, 4, 1, 1),
        }
    }

    /// Snake-case slot name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EquipmentSlot::Helmet => "helmet",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Pants => "pants",
            EquipmentSlot::Boots => "boots",
            EquipmentSlot::MainHand => "main_hand",
            EquipmentSlot::OffHand => "off_hand",
            EquipmentSlot::Amulet => "amulet",
            EquipmentSlot::Ring => "ring",
            EquipmentSlot::Pet => "pet",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentSlot {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::UnknownSlot(s.to_string()))
    }
}

/// Scale item base stats by rarity, truncating each stat.
#[must_use]
pub fn item_stats(base: CombatStats, rarity: ItemRarity) -> CombatStats {
    let mult = rarity.multiplier();
    let scale = |v: u32| (f64::from(v) * mult) as u32;
    CombatStats {
        hp: scale(base.hp),
        attack: scale(base.attack),
        defense: scale(base.defense),
        speed: scale(base.speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_base_stats() {
        assert_eq!(class_base(Role::Tank).stats, CombatStats::new(100, 10, 8, 1));
        assert_eq!(class_base(Role::Healer).mana, 12);
        assert_eq!(class_base(Role::Dps).stats.attack, 14);
    }

    #[test]
    fn test_class_stats_with_level() {
        assert_eq!(class_stats_with_level(Role::Tank, 1), class_base(Role::Tank));
        let tank = class_stats_with_level(Role::Tank, 5);
        assert_eq!(tank.stats, CombatStats::new(180, 22, 16, 5));
        assert_eq!(tank.mana, 10);
        // Level 0 behaves like level 1
        assert_eq!(class_stats_with_level(Role::Dps, 0), class_base(Role::Dps));
    }

    #[test]
    fn test_xp_curve() {
        assert_eq!(xp_to_next_level(0), 100);
        assert_eq!(xp_to_next_level(1), 100);
        assert_eq!(xp_to_next_level(2), 110);
        assert_eq!(xp_to_next_level(3), 121);
        assert_eq!(xp_to_next_level(4), 133);
        assert_eq!(xp_to_next_level(5), 146);
    }

    #[test]
    fn test_gain_xp_multiple_levels() {
        let mut progress = Progression::default();
        assert_eq!(progress.gain_xp(50), 0);
        assert_eq!(progress.level, 1);
        // 50 + 200 = 250 -> level 2 (-100) -> level 3 (-110) -> 40 left
        assert_eq!(progress.gain_xp(200), 2);
        assert_eq!(progress, Progression { level: 3, xp: 40 });
    }

    #[test]
    fn test_item_stats_by_rarity() {
        let base = EquipmentSlot::Ring.base_stats();
        assert_eq!(item_stats(base, ItemRarity::Basic), base);
        // 4 * 1.8 = 7.2, 3 * 1.8 = 5.4, 2 * 1.8 = 3.6, 1 * 1.8 = 1.8
        assert_eq!(
            item_stats(base, ItemRarity::Uncommon),
            CombatStats::new(7, 5, 3, 1)
        );
        assert_eq!(
            item_stats(EquipmentSlot::MainHand.base_stats(), ItemRarity::Mythic),
            CombatStats::new(0, 60, 20, 0)
        );
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("main_hand".parse::<EquipmentSlot>().unwrap(), EquipmentSlot::MainHand);
        assert!("tail".parse::<EquipmentSlot>().is_err());
    }
}
