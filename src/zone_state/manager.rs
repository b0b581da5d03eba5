//! Zone state manager: movement, spawn lifecycle and encounter triggers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::SimConfig;
use crate::encounter::{generate_pack_for_key, ArchetypeCatalog, EnemyInstance};
use crate::world::{Cell, TileType, ZoneCache, ZoneCoord, ZoneInfo};
use crate::zone_state::{
    validate_target, zone_transition, MemorySpawnStore, MoveOutcome, MoveRejection, MoveRequest,
    SpawnPoint, SpawnStore, DEFAULT_RESPAWN_SECONDS,
};

/// Chebyshev radius in which an `EnemyZone` tile wakes a spawn.
const ENEMY_ZONE_RADIUS: u32 = 1;

/// A claimed spawn and the pack generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encounter {
    /// The spawn, now dead.
    pub spawn: SpawnPoint,
    /// Generated enemies. Empty when no archetype or level allows a pack.
    pub pack: Vec<EnemyInstance>,
}

/// Seed key of an encounter: zone, cell and trigger time.
#[must_use]
pub fn encounter_seed_key(zone: ZoneCoord, cell: Cell, now: DateTime<Utc>) -> String {
    format!("{zone}:{}:{}:{}", cell.x, cell.y, now.timestamp_micros())
}

/// Binds world topology, spawn lifecycle and encounter generation.
///
/// Shareable across threads; every mutation goes through the spawn store.
#[derive(Debug)]
pub struct ZoneStateManager<S = MemorySpawnStore> {
    cache: Arc<ZoneCache>,
    catalog: ArchetypeCatalog,
    respawn_seconds: u32,
    store: S,
}

impl ZoneStateManager<MemorySpawnStore> {
    /// Create a manager over a fresh in-memory store.
    #[must_use]
    pub fn in_memory(catalog: ArchetypeCatalog) -> Self {
        Self::new(MemorySpawnStore::new(), catalog)
    }
}

impl<S: SpawnStore> ZoneStateManager<S> {
    /// Create a manager with default settings.
    #[must_use]
    pub fn new(store: S, catalog: ArchetypeCatalog) -> Self {
        Self {
            cache: Arc::new(ZoneCache::default()),
            catalog,
            respawn_seconds: DEFAULT_RESPAWN_SECONDS,
            store,
        }
    }

    /// Create a manager using the world and spawn sections of a config.
    #[must_use]
    pub fn from_config(store: S, catalog: ArchetypeCatalog, config: &SimConfig) -> Self {
        Self::new(store, catalog)
            .with_cache(Arc::new(ZoneCache::new(config.world.cache_capacity)))
            .with_respawn_seconds(config.spawns.respawn_seconds)
    }

    /// Use a shared zone cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ZoneCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Set the respawn delay of newly created spawns.
    #[must_use]
    pub const fn with_respawn_seconds(mut self, seconds: u32) -> Self {
        self.respawn_seconds = seconds;
        self
    }

    /// The spawn store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The archetype catalog.
    pub const fn catalog(&self) -> &ArchetypeCatalog {
        &self.catalog
    }

    /// The zone cache.
    pub fn cache(&self) -> &ZoneCache {
        &self.cache
    }

    /// Zone description, generated on first access.
    pub fn zone(&self, zone: ZoneCoord) -> Arc<ZoneInfo> {
        self.cache.get(zone)
    }

    /// Create a spawn point for every `Enemy` tile of a zone that lacks one.
    ///
    /// Idempotent and safe to call concurrently. Does nothing when the
    /// catalog is empty. Returns the number of spawns created.
    pub fn ensure_spawns_for_zone(&self, zone: ZoneCoord) -> usize {
        if self.store.is_ensured(zone) {
            return 0;
        }
        let Some(archetype) = self.catalog.first() else {
            warn!(%zone, "empty catalog, no spawns created");
            return 0;
        };

        let info = self.zone(zone);
        let spawns = info
            .tiles
            .cells_of(TileType::Enemy)
            .map(|cell| SpawnPoint::new(zone, cell, archetype.name.clone(), self.respawn_seconds))
            .collect();

        let created = self.store.insert_missing(zone, spawns);
        if created > 0 {
            info!(%zone, created, "created spawn points");
        }
        created
    }

    /// Revive dead spawns of a zone whose deadline has passed.
    ///
    /// Returns the number of revived spawns.
    pub fn refresh_respawns(&self, zone: ZoneCoord, now: DateTime<Utc>) -> usize {
        let revived = self.store.refresh(zone, now);
        if revived > 0 {
            info!(%zone, revived, "spawns respawned");
        }
        revived
    }

    /// Try to wake a spawn from a cell.
    ///
    /// An `Enemy` tile matches the alive spawn on that exact cell, an
    /// `EnemyZone` tile any alive spawn next to it. A match is killed
    /// atomically; a concurrent loser gets `None`.
    pub fn trigger_at(
        &self,
        zone: ZoneCoord,
        cell: Cell,
        now: DateTime<Utc>,
        seed_key: &str,
    ) -> Option<Encounter> {
        self.ensure_spawns_for_zone(zone);
        self.refresh_respawns(zone, now);

        let radius = match self.zone(zone).tile(cell)? {
            TileType::Enemy => 0,
            TileType::EnemyZone => ENEMY_ZONE_RADIUS,
            _ => return None,
        };

        let spawn = self.store.claim(zone, cell, radius, now)?;
        let pack = generate_pack_for_key(zone.level(), &self.catalog, seed_key);
        info!(%zone, spawn = %spawn.cell, enemies = pack.len(), "spawn triggered");

        Some(Encounter { spawn, pack })
    }

    /// Apply a movement request.
    ///
    /// Only the target tile is checked; the step length is not. A request
    /// carrying zero lives is refused before anything else.
    pub fn move_player(&self, request: MoveRequest, now: DateTime<Utc>) -> MoveOutcome {
        let MoveRequest {
            zone,
            from,
            to,
            lives,
        } = request;
        if lives == Some(0) {
            debug!(%zone, %from, "move rejected, no lives left");
            return MoveOutcome::Rejected(MoveRejection::OutOfLives);
        }
        let info = self.zone(zone);

        let tile = match validate_target(&info, to) {
            Ok(tile) => tile,
            Err(rejection) => {
                debug!(%zone, %from, %rejection, "move rejected");
                return MoveOutcome::Rejected(rejection);
            }
        };

        if let Some((next, cell)) = zone_transition(&info, to) {
            debug!(from = %zone, to = %next, %cell, "zone changed");
            return MoveOutcome::ZoneChanged { zone: next, cell };
        }

        self.ensure_spawns_for_zone(zone);
        trace!(%zone, %from, %to, %tile, "moved");

        match tile {
            TileType::Shop => MoveOutcome::ShopEntered { cell: to },
            tile if tile.is_hostile() => {
                let key = encounter_seed_key(zone, to, now);
                match self.trigger_at(zone, to, now, &key) {
                    Some(Encounter { spawn, pack }) if !pack.is_empty() => {
                        MoveOutcome::SpawnTriggered {
                            cell: to,
                            spawn,
                            pack,
                        }
                    }
                    _ => MoveOutcome::Moved { cell: to },
                }
            }
            _ => MoveOutcome::Moved { cell: to },
        }
    }

    /// Cells of alive spawns in a zone, after lazy respawn.
    pub fn alive_spawns(&self, zone: ZoneCoord, now: DateTime<Utc>) -> Vec<Cell> {
        self.ensure_spawns_for_zone(zone);
        self.refresh_respawns(zone, now);
        self.store
            .spawns(zone)
            .into_iter()
            .filter(|s| s.is_alive)
            .map(|s| s.cell)
            .collect()
    }
}
