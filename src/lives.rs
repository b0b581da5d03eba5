//! Life regeneration and loss.
//!
//! Lives regenerate one per interval up to a maximum. Everything here is a
//! pure function of the stored state and the current time; persisting the
//! returned state is the caller's job.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::world::{Cell, ZoneCoord, PORTAL_INDEX};

/// Where a player with no lives left is sent.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const SAFE_RESPAWN: (ZoneCoord, Cell) = (
    ZoneCoord::ORIGIN,
    Cell::new(PORTAL_INDEX as i32, PORTAL_INDEX as i32),
);

/// Life cap and regeneration speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivesPolicy {
    /// Maximum number of lives (default: 3).
    pub max_lives: u32,
    /// Seconds to regenerate one life (default: 600).
    pub regen_interval_seconds: u32,
}

impl Default for LivesPolicy {
    fn default() -> Self {
        Self {
            max_lives: 3,
            regen_interval_seconds: 600,
        }
    }
}

impl LivesPolicy {
    /// Regeneration interval as a duration.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::seconds(i64::from(self.regen_interval_seconds))
    }

    /// Apply [`regen`] with this policy.
    #[must_use]
    pub fn regen(&self, lives: u32, last_tick: Option<DateTime<Utc>>, now: DateTime<Utc>) -> LifeTick {
        regen(last_tick, now, lives, self.max_lives, self.interval())
    }

    /// Apply [`lose_life`] with this policy.
    #[must_use]
    pub fn lose_life(&self, lives: u32, last_tick: Option<DateTime<Utc>>, now: DateTime<Utc>) -> LifeLoss {
        lose_life(last_tick, now, lives, self.max_lives, self.interval())
    }
}

/// Life state after regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeTick {
    /// Lives after regeneration.
    pub lives: u32,
    /// Lives gained by this call.
    pub gained: u32,
    /// New regeneration reference time, to be stored.
    pub last_tick: DateTime<Utc>,
    /// Seconds until the next life, 0 when full.
    pub seconds_to_next: u64,
}

/// Result of losing a life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeLoss {
    /// Life state after the loss.
    pub tick: LifeTick,
    /// Safe-zone position the player must be moved to, set when no lives remain.
    pub sent_to: Option<(ZoneCoord, Cell)>,
}

/// Regenerate lives.
///
/// A missing or future `last_tick` is treated as `now`. When full, the tick
/// is realigned to `now` so time spent full never banks lives. Otherwise the
/// tick only advances by whole intervals consumed, keeping partial progress.
#[must_use]
pub fn regen(
    last_tick: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    lives: u32,
    max: u32,
    interval: Duration,
) -> LifeTick {
    let tick = match last_tick {
        Some(tick) if tick <= now => tick,
        _ => now,
    };

    let full = LifeTick {
        lives: max,
        gained: max.saturating_sub(lives),
        last_tick: now,
        seconds_to_next: 0,
    };
    if lives >= max {
        return LifeTick { gained: 0, ..full };
    }
    let interval_seconds = interval.num_seconds();
    if interval_seconds <= 0 {
        return full;
    }

    let ticks = (now - tick).num_seconds() / interval_seconds;
    if ticks <= 0 {
        return LifeTick {
            lives,
            gained: 0,
            last_tick: tick,
            seconds_to_next: seconds_until(tick + interval, now),
        };
    }

    let missing = max - lives;
    let gained = u32::try_from(ticks).map_or(missing, |t| t.min(missing));
    let lives = lives + gained;
    if lives >= max {
        return LifeTick { gained, ..full };
    }

    let last_tick = tick + interval * i32::try_from(gained).unwrap_or(i32::MAX);
    LifeTick {
        lives,
        gained,
        last_tick,
        seconds_to_next: seconds_until(last_tick + interval, now),
    }
}

/// Lose one life after regenerating.
///
/// When this leaves the player with no lives, the result names the safe-zone
/// position to send them to.
#[must_use]
pub fn lose_life(
    last_tick: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    lives: u32,
    max: u32,
    interval: Duration,
) -> LifeLoss {
    let before = regen(last_tick, now, lives, max, interval);
    let remaining = before.lives.saturating_sub(1);
    let tick = regen(Some(before.last_tick), now, remaining, max, interval);

    LifeLoss {
        tick,
        sent_to: (tick.lives == 0).then_some(SAFE_RESPAWN),
    }
}

fn seconds_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((deadline - now).num_seconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    fn interval() -> Duration {
        Duration::seconds(600)
    }

    #[test]
    fn test_full_realigns_tick() {
        let tick = regen(Some(at(0)), at(5000), 3, 3, interval());
        assert_eq!(tick.lives, 3);
        assert_eq!(tick.gained, 0);
        assert_eq!(tick.last_tick, at(5000));
        assert_eq!(tick.seconds_to_next, 0);
    }

    #[test]
    fn test_partial_interval_keeps_tick() {
        let tick = regen(Some(at(0)), at(250), 1, 3, interval());
        assert_eq!(tick.lives, 1);
        assert_eq!(tick.gained, 0);
        assert_eq!(tick.last_tick, at(0));
        assert_eq!(tick.seconds_to_next, 350);
    }

    #[test]
    fn test_advances_by_consumed_intervals() {
        let tick = regen(Some(at(0)), at(700), 0, 3, interval());
        assert_eq!(tick.lives, 1);
        assert_eq!(tick.gained, 1);
        assert_eq!(tick.last_tick, at(600));
        assert_eq!(tick.seconds_to_next, 500);
    }

    #[test]
    fn test_refill_caps_and_resets() {
        let tick = regen(Some(at(0)), at(6000), 1, 3, interval());
        assert_eq!(tick.lives, 3);
        assert_eq!(tick.gained, 2);
        assert_eq!(tick.last_tick, at(6000));
        assert_eq!(tick.seconds_to_next, 0);
    }

    #[test]
    fn test_future_or_missing_tick_is_now() {
        let tick = regen(Some(at(1000)), at(10), 1, 3, interval());
        assert_eq!(tick.last_tick, at(10));
        assert_eq!(tick.seconds_to_next, 600);

        let tick = regen(None, at(10), 2, 3, interval());
        assert_eq!(tick.last_tick, at(10));
        assert_eq!(tick.lives, 2);
    }

    #[test]
    fn test_lose_life_from_full_starts_timer() {
        let loss = lose_life(Some(at(0)), at(100), 3, 3, interval());
        assert_eq!(loss.tick.lives, 2);
        assert_eq!(loss.tick.last_tick, at(100));
        assert_eq!(loss.tick.seconds_to_next, 600);
        assert_eq!(loss.sent_to, None);
    }

    #[test]
    fn test_losing_last_life_sends_to_safe_zone() {
        let loss = lose_life(Some(at(0)), at(100), 1, 3, interval());
        assert_eq!(loss.tick.lives, 0);
        assert_eq!(loss.sent_to, Some((ZoneCoord::ORIGIN, Cell::new(9, 9))));

        // Already at zero stays at zero
        let loss = lose_life(Some(at(0)), at(100), 0, 3, interval());
        assert_eq!(loss.tick.lives, 0);
        assert!(loss.sent_to.is_some());
    }

    #[test]
    fn test_policy_defaults() {
        let policy = LivesPolicy::default();
        assert_eq!(policy.max_lives, 3);
        assert_eq!(policy.interval(), interval());
        assert_eq!(policy.regen(3, None, at(0)).lives, 3);
    }
}
