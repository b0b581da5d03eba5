//! Persistent enemy spawn points and their store.
//!
//! A spawn point lives on one `Enemy` tile and cycles between alive and dead.
//! Dead spawns revive lazily: nothing runs on a timer, the deadline is checked
//! whenever the zone is accessed.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::world::{Cell, ZoneCoord};

/// Seconds a killed spawn stays dead unless configured otherwise.
pub const DEFAULT_RESPAWN_SECONDS: u32 = 300;

/// A persistent enemy position in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Zone the spawn belongs to.
    pub zone: ZoneCoord,
    /// Cell of the `Enemy` tile.
    pub cell: Cell,
    /// Name of the linked archetype.
    pub archetype: String,
    /// Whether the spawn can be triggered.
    pub is_alive: bool,
    /// Seconds between death and revival.
    pub respawn_seconds: u32,
    /// Revival deadline, set while dead.
    pub respawn_at: Option<DateTime<Utc>>,
}

impl SpawnPoint {
    /// Create a living spawn point.
    #[must_use]
    pub fn new(zone: ZoneCoord, cell: Cell, archetype: impl Into<String>, respawn_seconds: u32) -> Self {
        Self {
            zone,
            cell,
            archetype: archetype.into(),
            is_alive: true,
            respawn_seconds,
            respawn_at: None,
        }
    }

    /// Mark the spawn dead until `now + respawn_seconds`.
    pub fn kill(&mut self, now: DateTime<Utc>) {
        self.is_alive = false;
        self.respawn_at = Some(now + Duration::seconds(i64::from(self.respawn_seconds)));
    }

    /// Revive the spawn if its deadline has passed.
    ///
    /// Returns `true` if the spawn came back to life.
    pub fn revive_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.respawn_at {
            Some(deadline) if !self.is_alive && deadline <= now => {
                self.is_alive = true;
                self.respawn_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Storage seam for spawn points.
///
/// Implementations must make each method atomic with respect to the others:
/// two concurrent claims of the same spawn must never both succeed, and two
/// concurrent inserts of the same cell must never create duplicates.
pub trait SpawnStore: Send + Sync {
    /// Check if spawns for a zone were already created.
    fn is_ensured(&self, zone: ZoneCoord) -> bool;

    /// Insert spawns whose cell has no spawn yet and mark the zone ensured.
    ///
    /// Returns the number of spawns inserted.
    fn insert_missing(&self, zone: ZoneCoord, spawns: Vec<SpawnPoint>) -> usize;

    /// Revive every dead spawn of a zone whose deadline is at or before `now`.
    ///
    /// Returns the number of revived spawns.
    fn refresh(&self, zone: ZoneCoord, now: DateTime<Utc>) -> usize;

    /// Find the first alive spawn within Chebyshev `radius` of `cell` and kill it.
    ///
    /// Returns the claimed spawn in its dead state, or `None` if nothing matched.
    fn claim(&self, zone: ZoneCoord, cell: Cell, radius: u32, now: DateTime<Utc>) -> Option<SpawnPoint>;

    /// All spawns of a zone, in insertion order.
    fn spawns(&self, zone: ZoneCoord) -> Vec<SpawnPoint>;
}

impl<S: SpawnStore + ?Sized> SpawnStore for Arc<S> {
    fn is_ensured(&self, zone: ZoneCoord) -> bool {
        (**self).is_ensured(zone)
    }

    fn insert_missing(&self, zone: ZoneCoord, spawns: Vec<SpawnPoint>) -> usize {
        (**self).insert_missing(zone, spawns)
    }

    fn refresh(&self, zone: ZoneCoord, now: DateTime<Utc>) -> usize {
        (**self).refresh(zone, now)
    }

    fn claim(&self, zone: ZoneCoord, cell: Cell, radius: u32, now: DateTime<Utc>) -> Option<SpawnPoint> {
        (**self).claim(zone, cell, radius, now)
    }

    fn spawns(&self, zone: ZoneCoord) -> Vec<SpawnPoint> {
        (**self).spawns(zone)
    }
}

#[derive(Debug, Default)]
struct SpawnTable {
    zones: HashMap<ZoneCoord, Vec<SpawnPoint>>,
    ensured: HashSet<ZoneCoord>,
}

/// In-process spawn store. Thread-safe.
#[derive(Debug, Default)]
pub struct MemorySpawnStore {
    table: Mutex<SpawnTable>,
}

impl MemorySpawnStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of spawns across all zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().zones.values().map(Vec::len).sum()
    }

    /// Check if the store holds no spawns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, SpawnTable> {
        // Every mutation leaves the table consistent, so a poisoned lock is usable
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SpawnStore for MemorySpawnStore {
    fn is_ensured(&self, zone: ZoneCoord) -> bool {
        self.lock().ensured.contains(&zone)
    }

    fn insert_missing(&self, zone: ZoneCoord, spawns: Vec<SpawnPoint>) -> usize {
        let mut table = self.lock();
        table.ensured.insert(zone);

        let existing = table.zones.entry(zone).or_default();
        let mut inserted = 0;
        for spawn in spawns {
            if existing.iter().any(|s| s.cell == spawn.cell) {
                continue;
            }
            existing.push(spawn);
            inserted += 1;
        }
        inserted
    }

    fn refresh(&self, zone: ZoneCoord, now: DateTime<Utc>) -> usize {
        let mut table = self.lock();
        let Some(spawns) = table.zones.get_mut(&zone) else {
            return 0;
        };
        let mut revived = 0;
        for spawn in spawns.iter_mut() {
            if spawn.revive_if_due(now) {
                revived += 1;
            }
        }
        revived
    }

    fn claim(&self, zone: ZoneCoord, cell: Cell, radius: u32, now: DateTime<Utc>) -> Option<SpawnPoint> {
        let mut table = self.lock();
        let spawn = table
            .zones
            .get_mut(&zone)?
            .iter_mut()
            .find(|s| s.is_alive && s.cell.chebyshev(cell) <= radius)?;
        spawn.kill(now);
        Some(spawn.clone())
    }

    fn spawns(&self, zone: ZoneCoord) -> Vec<SpawnPoint> {
        self.lock().zones.get(&zone).cloned().unwrap_or_default()
    }
}
