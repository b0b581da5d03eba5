//! Combat participants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Combat role of a battler.
///
/// Roles are a closed set; anything else is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Front line, acts first.
    Tank,
    /// Damage dealer.
    Dps,
    /// Hybrid starter class.
    Apprentice,
    /// Heals allies during preparation, acts last.
    Healer,
}

/// Combat phase acting order, first to last.
pub const ROLE_PRIORITY: [Role; 4] = [Role::Tank, Role::Dps, Role::Apprentice, Role::Healer];

impl Role {
    /// One-based position in [`ROLE_PRIORITY`] (lower acts first).
    #[must_use]
    pub const fn priority(self) -> u8 {
        let mut i = 0;
        let mut rank = 1;
        while i < ROLE_PRIORITY.len() {
            if ROLE_PRIORITY[i] as u8 == self as u8 {
                return rank;
            }
            i += 1;
            rank += 1;
        }
        // Every role is listed, so this is never reached
        rank
    }

    /// Lowercase role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Tank => "tank",
            Role::Dps => "dps",
            Role::Apprentice => "apprentice",
            Role::Healer => "healer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ROLE_PRIORITY
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::UnknownRole(s.to_string()))
    }
}

/// Which roster a battler fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The player party.
    Player,
    /// The enemy pack.
    Enemy,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Core fighting stats shared by characters, classes and enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatStats {
    /// Hit points.
    pub hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Damage reduction.
    pub defense: u32,
    /// Initiative during preparation and tie-break in combat.
    pub speed: u32,
}

impl CombatStats {
    /// Create a stat block.
    #[must_use]
    pub const fn new(hp: u32, attack: u32, defense: u32, speed: u32) -> Self {
        Self {
            hp,
            attack,
            defense,
            speed,
        }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn plus(self, other: CombatStats) -> Self {
        Self {
            hp: self.hp.saturating_add(other.hp),
            attack: self.attack.saturating_add(other.attack),
            defense: self.defense.saturating_add(other.defense),
            speed: self.speed.saturating_add(other.speed),
        }
    }
}

/// A unit taking part in one combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    /// Display name used in the battle log.
    pub name: String,
    /// Combat role.
    pub role: Role,
    /// Roster the battler belongs to.
    pub side: Side,
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub max_hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Damage reduction.
    pub defense: u32,
    /// Initiative.
    pub speed: u32,
    /// Current mana.
    pub mana: u32,
    /// Maximum mana.
    pub max_mana: u32,
    /// Whether the battler can still act.
    pub alive: bool,
}

impl Battler {
    /// Create a battler at full HP and full mana.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role, side: Side, stats: CombatStats, mana: u32) -> Self {
        Self {
            name: name.into(),
            role,
            side,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            mana,
            max_mana: mana,
            alive: stats.hp > 0,
        }
    }

    /// Apply a raw hit, reduced by defense with a minimum of 1.
    ///
    /// Returns the damage dealt.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let damage = raw.saturating_sub(self.defense).max(1);
        self.hp = self.hp.saturating_sub(damage);
        if self.hp == 0 {
            self.alive = false;
        }
        damage
    }

    /// Restore HP, capped at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Restore mana, capped at the maximum.
    pub fn regen_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
    }

    /// Current HP as a fraction of maximum HP.
    #[must_use]
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }
}
