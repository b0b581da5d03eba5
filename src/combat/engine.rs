//! Turn-based battle resolution.
//!
//! Each turn has two phases. In preparation every living unit regenerates
//! mana, fastest first, and healers spend mana to heal the most wounded ally.
//! In combat units act by role priority, attacking the first living opponent.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combat::{Battler, Role, Side};

/// Tunable combat constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Turns played before the battle is a draw (default: 50).
    pub max_turns: u32,
    /// Mana regenerated per unit per turn (default: 3).
    pub mana_regen: u32,
    /// Mana spent by one heal attempt (default: 5).
    pub heal_cost: u32,
    /// Healed HP as a fraction of the healer's attack (default: 0.8).
    pub heal_ratio: f64,
    /// HP fraction below which a target cannot be healed (default: 0.10).
    pub heal_floor: f64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            max_turns: 50,
            mana_regen: 3,
            heal_cost: 5,
            heal_ratio: 0.8,
            heal_floor: 0.10,
        }
    }
}

impl CombatRules {
    /// HP restored by a healer with the given attack.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn heal_amount(&self, attack: u32) -> u32 {
        (f64::from(attack) * self.heal_ratio).floor().max(0.0) as u32
    }
}

/// Final result of a battle, from the players' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every enemy died.
    Win,
    /// Every player died.
    Lose,
    /// The turn limit was reached.
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        })
    }
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleReport {
    /// How the battle ended.
    pub outcome: Outcome,
    /// Number of turns played.
    pub turns: u32,
    /// Human-readable turn log.
    pub log: Vec<String>,
    /// Player roster after the battle.
    pub players: Vec<Battler>,
    /// Enemy roster after the battle.
    pub enemies: Vec<Battler>,
}

/// Resolve a battle with the default rules.
#[must_use]
pub fn resolve(players: Vec<Battler>, enemies: Vec<Battler>) -> BattleReport {
    resolve_with(&CombatRules::default(), players, enemies)
}

/// Resolve a battle with explicit rules.
///
/// Battlers are tagged with the side of the roster they are passed in.
#[must_use]
pub fn resolve_with(
    rules: &CombatRules,
    players: Vec<Battler>,
    enemies: Vec<Battler>,
) -> BattleReport {
    let mut battle = Battle::new(players, enemies);
    let mut log = Vec::new();
    let mut turn: u32 = 1;

    let (outcome, turns) = loop {
        log.push(format!("--- Turn {turn} ---"));

        battle.preparation_phase(rules, &mut log);
        battle.combat_phase(&mut log);

        if !battle.any_alive(Side::Player) {
            log.push("The players have been defeated!".to_string());
            break (Outcome::Lose, turn);
        }
        if !battle.any_alive(Side::Enemy) {
            log.push("The players won!".to_string());
            break (Outcome::Win, turn);
        }

        turn += 1;
        if turn > rules.max_turns {
            log.push(format!("Draw ({} turns).", rules.max_turns));
            break (Outcome::Draw, rules.max_turns);
        }
    };

    debug!(%outcome, turns, log_lines = log.len(), "battle resolved");

    BattleReport {
        outcome,
        turns,
        log,
        players: battle.players,
        enemies: battle.enemies,
    }
}

/// Reference to a unit in one of the two rosters.
#[derive(Debug, Clone, Copy)]
struct UnitRef {
    side: Side,
    index: usize,
}

struct Battle {
    players: Vec<Battler>,
    enemies: Vec<Battler>,
}

impl Battle {
    fn new(mut players: Vec<Battler>, mut enemies: Vec<Battler>) -> Self {
        for unit in &mut players {
            unit.side = Side::Player;
        }
        for unit in &mut enemies {
            unit.side = Side::Enemy;
        }
        Self { players, enemies }
    }

    fn roster(&self, side: Side) -> &[Battler] {
        match side {
            Side::Player => &self.players,
            Side::Enemy => &self.enemies,
        }
    }

    fn unit(&self, unit: UnitRef) -> &Battler {
        &self.roster(unit.side)[unit.index]
    }

    fn unit_mut(&mut self, unit: UnitRef) -> &mut Battler {
        match unit.side {
            Side::Player => &mut self.players[unit.index],
            Side::Enemy => &mut self.enemies[unit.index],
        }
    }

    fn any_alive(&self, side: Side) -> bool {
        self.roster(side).iter().any(|b| b.alive)
    }

    /// All units, players first, in roster order.
    fn all_units(&self) -> Vec<UnitRef> {
        let players = (0..self.players.len()).map(|index| UnitRef {
            side: Side::Player,
            index,
        });
        let enemies = (0..self.enemies.len()).map(|index| UnitRef {
            side: Side::Enemy,
            index,
        });
        players.chain(enemies).collect()
    }

    /// First living unit of a roster.
    fn attack_target(&self, side: Side) -> Option<UnitRef> {
        self.roster(side)
            .iter()
            .position(|b| b.alive)
            .map(|index| UnitRef { side, index })
    }

    /// Living unit of a roster with the lowest HP fraction, first on ties.
    fn heal_target(&self, side: Side) -> Option<UnitRef> {
        self.roster(side)
            .iter()
            .enumerate()
            .filter(|(_, b)| b.alive)
            .min_by(|(_, a), (_, b)| a.hp_fraction().total_cmp(&b.hp_fraction()))
            .map(|(index, _)| UnitRef { side, index })
    }

    fn preparation_phase(&mut self, rules: &CombatRules, log: &mut Vec<String>) {
        let mut order = self.all_units();
        order.sort_by(|a, b| self.unit(*b).speed.cmp(&self.unit(*a).speed));

        for actor in order {
            if !self.unit(actor).alive {
                continue;
            }
            self.unit_mut(actor).regen_mana(rules.mana_regen);

            if self.unit(actor).role != Role::Healer {
                continue;
            }
            let Some(target) = self.heal_target(actor.side) else {
                continue;
            };
            if self.unit(actor).mana < rules.heal_cost {
                continue;
            }

            self.unit_mut(actor).mana -= rules.heal_cost;
            let line = self.heal(rules, actor, target);
            log.push(line);
        }
    }

    /// Attempt a heal; mana has already been spent.
    fn heal(&mut self, rules: &CombatRules, actor: UnitRef, target: UnitRef) -> String {
        let healer = self.unit(actor);
        let patient = self.unit(target);

        if patient.max_hp > 0 && patient.hp_fraction() < rules.heal_floor {
            debug!(healer = %healer.name, target = %patient.name, "heal refused");
            return format!(
                "{} tries to heal {}, but they are below {:.0}% HP and cannot be healed.",
                healer.name,
                patient.name,
                rules.heal_floor * 100.0
            );
        }

        let amount = rules.heal_amount(healer.attack);
        let line = format!("{} heals {} for {amount} HP.", healer.name, patient.name);
        self.unit_mut(target).heal(amount);
        line
    }

    fn combat_phase(&mut self, log: &mut Vec<String>) {
        let mut order = self.all_units();
        order.sort_by(|a, b| {
            let (a, b) = (self.unit(*a), self.unit(*b));
            a.role
                .priority()
                .cmp(&b.role.priority())
                .then(b.speed.cmp(&a.speed))
        });

        for actor in order {
            if !self.unit(actor).alive {
                continue;
            }
            let Some(target) = self.attack_target(actor.side.opponent()) else {
                break;
            };

            let attack = self.unit(actor).attack;
            let damage = self.unit_mut(target).take_damage(attack);
            log.push(format!(
                "{} attacks {} for {damage} damage.",
                self.unit(actor).name,
                self.unit(target).name
            ));
        }
    }
}
