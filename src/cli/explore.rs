//! Explore command implementation.
//!
//! Walkers share one [`ZoneStateManager`] and move at random, fighting what
//! they run into. Each walker keeps its own simulated clock; a walker with
//! no lives has its moves refused until one regenerates.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use super::output::{format_explore_text, ExploreStats, JsonExploreResult};
use super::{load_catalog, progress_bar, seed_or_clock, CliError, OutputFormat};
use chrono::{DateTime, Duration, Utc};
use loco::combat::{resolve_with, Outcome, Role};
use loco::encounter::{calculate_rewards, EnemyInstance};
use loco::roster::{pack_to_battlers, CharacterSheet};
use loco::world::{Cell, TileType, ZoneCoord};
use loco::zone_state::{
    MemorySpawnStore, MoveOutcome, MoveRejection, MoveRequest, ZoneStateManager,
};
use loco::SimConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

/// Simulated seconds per step.
const STEP_SECONDS: i64 = 5;

/// Single-cell moves a walker picks from.
const STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Party every walker brings.
const PARTY: [Role; 3] = [Role::Tank, Role::Dps, Role::Healer];

/// Options of the explore command.
#[derive(Debug)]
pub(crate) struct ExploreOptions {
    /// Starting zone.
    pub(crate) zone: ZoneCoord,
    /// Number of walkers.
    pub(crate) players: u64,
    /// Steps per walker.
    pub(crate) steps: u32,
    /// Party level.
    pub(crate) level: u32,
    /// Base seed.
    pub(crate) seed: Option<u64>,
    /// Thread pool size.
    pub(crate) threads: Option<usize>,
    /// Catalog file.
    pub(crate) catalog: Option<PathBuf>,
    /// Show a progress bar.
    pub(crate) progress: bool,
}

/// Execute the explore command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub(crate) fn execute(
    config: &SimConfig,
    options: &ExploreOptions,
    format: OutputFormat,
) -> Result<(), CliError> {
    let catalog = load_catalog(options.catalog.as_deref())?;

    if let Some(num_threads) = options.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed_or_clock(options.seed);
    let manager = ZoneStateManager::from_config(MemorySpawnStore::new(), catalog, config);
    let pb = options
        .progress
        .then(|| progress_bar(options.players, "walkers"))
        .transpose()?;

    let epoch = Utc::now();
    let start = Instant::now();

    let stats = (0..options.players)
        .into_par_iter()
        .fold(ExploreStats::default, |mut local, i| {
            let walker = Walker::new(&manager, config, options, base_seed.wrapping_add(i), epoch);
            walker.run(&manager, config, options.steps, &mut local);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(ExploreStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let end = epoch + Duration::seconds(i64::from(options.steps) * STEP_SECONDS);
    let spawns_alive = manager.alive_spawns(options.zone, end).len();
    let cache = manager.cache();

    match format {
        OutputFormat::Text => {
            print!("{}", format_explore_text(&stats, spawns_alive, cache.len()));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            let cache_stats = cache.stats();
            let result = JsonExploreResult {
                seed: base_seed,
                stats: &stats,
                cached_zones: cache.len(),
                cache_hits: cache_stats.hits,
                cache_misses: cache_stats.misses,
                duration_secs: duration.as_secs_f64(),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

/// One simulated player with a party, lives and a position.
#[derive(Debug)]
struct Walker {
    rng: StdRng,
    party: Vec<CharacterSheet>,
    zone: ZoneCoord,
    cell: Cell,
    lives: u32,
    life_tick: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    visited: HashSet<ZoneCoord>,
}

impl Walker {
    fn new(
        manager: &ZoneStateManager,
        config: &SimConfig,
        options: &ExploreOptions,
        seed: u64,
        epoch: DateTime<Utc>,
    ) -> Self {
        let info = manager.zone(options.zone);
        let cell = info
            .tiles
            .iter()
            .find(|&(_, tile)| tile == TileType::Ground)
            .map_or(Cell::new(9, 9), |(cell, _)| cell);
        let party = PARTY
            .iter()
            .map(|&class| CharacterSheet::new(class.name(), class).with_level(options.level))
            .collect();

        Self {
            rng: StdRng::seed_from_u64(seed),
            party,
            zone: options.zone,
            cell,
            lives: config.lives.max_lives,
            life_tick: None,
            now: epoch,
            visited: HashSet::from([options.zone]),
        }
    }

    fn run(mut self, manager: &ZoneStateManager, config: &SimConfig, steps: u32, stats: &mut ExploreStats) {
        let policy = config.lives;

        for _ in 0..steps {
            self.now += Duration::seconds(STEP_SECONDS);
            stats.steps += 1;

            let tick = policy.regen(self.lives, self.life_tick, self.now);
            self.lives = tick.lives;
            self.life_tick = Some(tick.last_tick);

            let Some(&(dx, dy)) = STEPS.choose(&mut self.rng) else {
                continue;
            };
            let to = Cell::new(self.cell.x + dx, self.cell.y + dy);
            let request = MoveRequest::new(self.zone, self.cell, to).with_lives(self.lives);
            let outcome = manager.move_player(request, self.now);

            match &outcome {
                MoveOutcome::Rejected(MoveRejection::OutOfLives) => stats.waiting += 1,
                MoveOutcome::Rejected(_) => stats.rejected += 1,
                MoveOutcome::Moved { .. } | MoveOutcome::SpawnTriggered { .. } => stats.moves += 1,
                MoveOutcome::ZoneChanged { zone, .. } => {
                    stats.zone_changes += 1;
                    self.visited.insert(*zone);
                }
                MoveOutcome::ShopEntered { .. } => stats.shops += 1,
            }
            if let Some((zone, cell)) = outcome.position(self.zone) {
                self.zone = zone;
                self.cell = cell;
            }
            if let MoveOutcome::SpawnTriggered { pack, .. } = outcome {
                self.fight(&pack, config, stats);
            }
        }

        stats.walkers += 1;
        stats.zones_visited += u64::try_from(self.visited.len()).unwrap_or(u64::MAX);
    }

    fn fight(&mut self, pack: &[EnemyInstance], config: &SimConfig, stats: &mut ExploreStats) {
        let battlers = self.party.iter().map(CharacterSheet::to_battler).collect();
        let report = resolve_with(&config.combat, battlers, pack_to_battlers(pack));
        stats.add_battle(report.outcome);

        match report.outcome {
            Outcome::Win => {
                let rewards = calculate_rewards(pack);
                stats.xp += rewards.xp;
                stats.coins += rewards.coin_value();
                for sheet in &mut self.party {
                    stats.levels_gained += u64::from(sheet.progress.gain_xp(rewards.xp));
                }
            }
            Outcome::Lose => {
                let loss = config.lives.lose_life(self.lives, self.life_tick, self.now);
                self.lives = loss.tick.lives;
                self.life_tick = Some(loss.tick.last_tick);
                if let Some((zone, cell)) = loss.sent_to {
                    debug!(from = %self.zone, "walker sent home");
                    stats.sent_home += 1;
                    self.zone = zone;
                    self.cell = cell;
                    self.visited.insert(zone);
                }
            }
            Outcome::Draw => {}
        }
    }
}
