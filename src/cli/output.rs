//! Output formatting utilities for CLI.

// Rates and shares are display-only
#![allow(clippy::cast_precision_loss)]

use loco::combat::{BattleReport, Outcome};
use loco::encounter::{BattleRewards, EnemyInstance, EnemyRarity, ENEMY_RARITY_CHANCES};
use loco::world::{Direction, ZoneInfo};
use serde::Serialize;

/// Format a zone as a header plus its tile map.
pub(super) fn format_zone_text(info: &ZoneInfo) -> String {
    let mut output = String::new();

    output.push_str(&format!("Zone {} (level {})", info.coord, info.level));
    if info.coord.is_safe() {
        output.push_str(" [safe]");
    }
    output.push('\n');
    for dir in Direction::ALL {
        output.push_str(&format!("  {dir:?}: {}\n", info.exits.get(dir)));
    }
    output.push('\n');
    output.push_str(&info.tiles.to_string());

    output
}

/// JSON-serializable battle result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBattleResult<'a> {
    /// Pack seed.
    pub(super) seed: u64,
    /// Zone level the pack was generated for.
    pub(super) level: u32,
    /// Generated enemies.
    pub(super) pack: &'a [EnemyInstance],
    /// Full battle report.
    pub(super) report: &'a BattleReport,
    /// Rewards, only on a win.
    pub(super) rewards: Option<BattleRewards>,
}

/// Format a battle as pack, log and outcome.
pub(super) fn format_battle_text(
    seed: u64,
    pack: &[EnemyInstance],
    report: &BattleReport,
    rewards: Option<&BattleRewards>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Enemy pack (seed: {seed})\n"));
    for enemy in pack {
        output.push_str(&format!(
            "  {} {} lv{}: {} HP, {} ATK, {} DEF, {} SPD\n",
            enemy.rarity, enemy.archetype, enemy.level, enemy.hp, enemy.attack, enemy.defense, enemy.speed
        ));
    }
    output.push('\n');

    for line in &report.log {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');

    output.push_str(&format!("Outcome: {} after {} turns\n", report.outcome, report.turns));
    for unit in &report.players {
        output.push_str(&format!("  {}: {}/{} HP\n", unit.name, unit.hp, unit.max_hp));
    }
    if let Some(rewards) = rewards {
        output.push_str(&format!(
            "Rewards: {} XP, {} bronze, {} silver, {} gold ({} coins)\n",
            rewards.xp,
            rewards.orbs_bronze,
            rewards.orbs_silver,
            rewards.orbs_gold,
            rewards.coin_value()
        ));
    }

    output
}

/// Aggregated results of an exploration run.
#[derive(Debug, Clone, Default, Serialize)]
pub(super) struct ExploreStats {
    /// Walkers that finished.
    pub(super) walkers: u64,
    /// Move requests issued.
    pub(super) steps: u64,
    /// Accepted moves inside a zone.
    pub(super) moves: u64,
    /// Rejected moves.
    pub(super) rejected: u64,
    /// Moves refused for lack of lives.
    pub(super) waiting: u64,
    /// Portal crossings.
    pub(super) zone_changes: u64,
    /// Shop entries.
    pub(super) shops: u64,
    /// Encounters fought.
    pub(super) encounters: u64,
    /// Battles won.
    pub(super) wins: u64,
    /// Battles lost.
    pub(super) losses: u64,
    /// Battles drawn.
    pub(super) draws: u64,
    /// Walkers sent back to the safe zone.
    pub(super) sent_home: u64,
    /// XP earned.
    pub(super) xp: u64,
    /// Orb value earned in coins.
    pub(super) coins: u64,
    /// Levels gained.
    pub(super) levels_gained: u64,
    /// Distinct zones visited, summed over walkers.
    pub(super) zones_visited: u64,
}

impl ExploreStats {
    /// Record a battle outcome.
    pub(super) fn add_battle(&mut self, outcome: Outcome) {
        self.encounters += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Lose => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Merge another set of stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.walkers += other.walkers;
        self.steps += other.steps;
        self.moves += other.moves;
        self.rejected += other.rejected;
        self.waiting += other.waiting;
        self.zone_changes += other.zone_changes;
        self.shops += other.shops;
        self.encounters += other.encounters;
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
        self.sent_home += other.sent_home;
        self.xp += other.xp;
        self.coins += other.coins;
        self.levels_gained += other.levels_gained;
        self.zones_visited += other.zones_visited;
    }

    fn win_rate(&self) -> f64 {
        if self.encounters == 0 {
            0.0
        } else {
            self.wins as f64 / self.encounters as f64 * 100.0
        }
    }
}

/// JSON-serializable exploration result.
#[derive(Debug, Serialize)]
pub(super) struct JsonExploreResult<'a> {
    /// Base seed.
    pub(super) seed: u64,
    /// Aggregated walker stats.
    pub(super) stats: &'a ExploreStats,
    /// Zones held in the generation cache.
    pub(super) cached_zones: usize,
    /// Cache lookups answered without generating.
    pub(super) cache_hits: u64,
    /// Cache lookups that generated a zone.
    pub(super) cache_misses: u64,
    /// Wall-clock duration in seconds.
    pub(super) duration_secs: f64,
}

/// Format exploration stats as human-readable text.
pub(super) fn format_explore_text(stats: &ExploreStats, spawns_alive: usize, cached_zones: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Exploration: {} walkers, {} steps\n",
        stats.walkers, stats.steps
    ));
    output.push_str(&format!(
        "  Moves: {} ({} rejected, {} portals, {} shops)\n",
        stats.moves, stats.rejected, stats.zone_changes, stats.shops
    ));
    output.push_str(&format!(
        "  Encounters: {} ({} won, {} lost, {} drawn, {:.1}% win rate)\n",
        stats.encounters,
        stats.wins,
        stats.losses,
        stats.draws,
        stats.win_rate()
    ));
    output.push_str(&format!(
        "  Sent home: {} ({} steps waiting for a life)\n",
        stats.sent_home, stats.waiting
    ));
    output.push_str(&format!(
        "  Earned: {} XP, {} coins, {} levels\n",
        stats.xp, stats.coins, stats.levels_gained
    ));
    output.push_str(&format!(
        "  Zones: {} visited, {cached_zones} cached, {spawns_alive} spawns alive in start zone\n",
        stats.zones_visited
    ));

    output
}

/// Rarity roll counts.
#[derive(Debug, Clone, Default)]
pub(super) struct RarityStats {
    /// Total rolls.
    pub(super) rolls: u64,
    /// Count per rarity, in [`EnemyRarity::ALL`] order.
    pub(super) counts: [u64; 4],
}

impl RarityStats {
    /// Record one roll.
    pub(super) fn add(&mut self, rarity: EnemyRarity) {
        self.rolls += 1;
        if let Some(i) = EnemyRarity::ALL.iter().position(|r| *r == rarity) {
            self.counts[i] += 1;
        }
    }

    /// Merge another set of stats into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.rolls += other.rolls;
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts) {
            *mine += theirs;
        }
    }

    fn rows(&self) -> impl Iterator<Item = (EnemyRarity, u64, f64, f64)> + '_ {
        ENEMY_RARITY_CHANCES
            .iter()
            .zip(self.counts)
            .map(|(&(rarity, expected), count)| {
                let observed = if self.rolls == 0 {
                    0.0
                } else {
                    count as f64 / self.rolls as f64
                };
                (rarity, count, observed, expected)
            })
    }
}

/// JSON-serializable rarity row.
#[derive(Debug, Serialize)]
pub(super) struct JsonRarityRow {
    /// Rarity name.
    pub(super) rarity: EnemyRarity,
    /// Times rolled.
    pub(super) count: u64,
    /// Observed share.
    pub(super) observed: f64,
    /// Table chance.
    pub(super) expected: f64,
}

/// JSON-serializable rarity result.
#[derive(Debug, Serialize)]
pub(super) struct JsonRarityResult {
    /// Base seed.
    pub(super) seed: u64,
    /// Total rolls.
    pub(super) rolls: u64,
    /// Per-rarity rows.
    pub(super) rarities: Vec<JsonRarityRow>,
}

impl JsonRarityResult {
    /// Create from rarity stats.
    pub(super) fn from_stats(stats: &RarityStats, seed: u64) -> Self {
        Self {
            seed,
            rolls: stats.rolls,
            rarities: stats
                .rows()
                .map(|(rarity, count, observed, expected)| JsonRarityRow {
                    rarity,
                    count,
                    observed,
                    expected,
                })
                .collect(),
        }
    }
}

/// Format rarity stats as a text table.
pub(super) fn format_rarity_text(stats: &RarityStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Rarity rolls: {}\n\n", stats.rolls));
    output.push_str(&format!(
        "{:<8} {:>10} {:>9} {:>9}\n",
        "Rarity", "Count", "Observed", "Expected"
    ));
    output.push_str(&"-".repeat(39));
    output.push('\n');
    for (rarity, count, observed, expected) in stats.rows() {
        output.push_str(&format!(
            "{:<8} {:>10} {:>8.3}% {:>8.3}%\n",
            rarity.name(),
            count,
            observed * 100.0,
            expected * 100.0
        ));
    }

    output
}

/// Format rarity stats as CSV.
pub(super) fn format_rarity_csv(stats: &RarityStats) -> String {
    let mut output = String::new();

    output.push_str("rarity,count,observed,expected\n");
    for (rarity, count, observed, expected) in stats.rows() {
        output.push_str(&format!("{},{count},{observed:.6},{expected:.6}\n", rarity.name()));
    }

    output
}
