//! Conversion of characters and enemies into battlers.

use serde::{Deserialize, Serialize};

use crate::balance::{class_stats_with_level, item_stats, EquipmentSlot, Progression};
use crate::combat::{Battler, CombatStats, Role, Side};
use crate::encounter::{EnemyInstance, ItemRarity};

/// Mana of every enemy battler.
pub const ENEMY_MANA: u32 = 5;

/// An item a character has equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    /// Display name.
    pub name: String,
    /// Slot the item occupies.
    pub slot: EquipmentSlot,
    /// Rarity tier.
    pub rarity: ItemRarity,
    /// Stats before the rarity multiplier.
    pub base: CombatStats,
}

impl EquippedItem {
    /// Create an item with the stock stats of its slot.
    #[must_use]
    pub fn for_slot(slot: EquipmentSlot, rarity: ItemRarity) -> Self {
        Self {
            name: format!("{rarity} {slot}"),
            slot,
            rarity,
            base: slot.base_stats(),
        }
    }

    /// Stat bonus granted by the item.
    #[must_use]
    pub fn total_stats(&self) -> CombatStats {
        item_stats(self.base, self.rarity)
    }
}

/// The combat-relevant part of a player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Class, which is also the combat role.
    pub class: Role,
    /// Level and XP.
    #[serde(flatten)]
    pub progress: Progression,
    /// Equipped items.
    #[serde(default)]
    pub equipment: Vec<EquippedItem>,
}

impl CharacterSheet {
    /// Create a level-1 character without equipment.
    #[must_use]
    pub fn new(name: impl Into<String>, class: Role) -> Self {
        Self {
            name: name.into(),
            class,
            progress: Progression::default(),
            equipment: Vec::new(),
        }
    }

    /// Set the level.
    #[must_use]
    pub const fn with_level(mut self, level: u32) -> Self {
        self.progress.level = level;
        self
    }

    /// Equip an item.
    #[must_use]
    pub fn with_item(mut self, item: EquippedItem) -> Self {
        self.equipment.push(item);
        self
    }

    /// Class stats at the current level plus every equipment bonus.
    #[must_use]
    pub fn total_stats(&self) -> CombatStats {
        let class = class_stats_with_level(self.class, self.progress.level);
        self.equipment
            .iter()
            .fold(class.stats, |total, item| total.plus(item.total_stats()))
    }

    /// Build the player battler for this character.
    #[must_use]
    pub fn to_battler(&self) -> Battler {
        let mana = class_stats_with_level(self.class, self.progress.level).mana;
        Battler::new(
            self.name.clone(),
            self.class,
            Side::Player,
            self.total_stats(),
            mana,
        )
    }
}

/// Build the enemy battler for a generated enemy. Enemies always fight as dps.
#[must_use]
pub fn enemy_to_battler(enemy: &EnemyInstance) -> Battler {
    Battler::new(
        enemy.archetype.clone(),
        Role::Dps,
        Side::Enemy,
        enemy.stats(),
        ENEMY_MANA,
    )
}

/// Build enemy battlers for a whole pack.
#[must_use]
pub fn pack_to_battlers(pack: &[EnemyInstance]) -> Vec<Battler> {
    pack.iter().map(enemy_to_battler).collect()
}
