//! Deterministic random numbers for zone generation.
//!
//! Zone grids are never persisted, only regenerated, so the generator must be
//! bit-exact across platforms and dependency upgrades. A small hand-rolled
//! xorshift keeps that guarantee.

// Generation uses intentional casts for range reduction
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

/// Multiplier mixed into the x axis of a zone seed.
const SEED_MIX_X: i64 = 73_856_093;
/// Multiplier mixed into the y axis of a zone seed.
const SEED_MIX_Y: i64 = 19_349_663;
/// Constant salt of every zone seed.
const SEED_SALT: i64 = 0x00A5_A5A5;

/// Derive the generation seed of a zone from its coordinates.
#[must_use]
pub fn zone_seed(x: i32, y: i32) -> u64 {
    let mixed = i64::from(x).wrapping_mul(SEED_MIX_X)
        ^ i64::from(y).wrapping_mul(SEED_MIX_Y)
        ^ SEED_SALT;
    mixed as u64
}

/// Hash an arbitrary key (FNV-1a, 64 bit) into a seed.
///
/// Stable across runs and platforms, unlike `std`'s randomised hasher.
#[must_use]
pub fn seed_from_key(key: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    key.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub struct ZoneRng {
    state: u64,
}

impl ZoneRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random integer in `[low, high]` (inclusive).
    pub fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = (i64::from(high) - i64::from(low) + 1) as u64;
        low + (self.next_u64() % span) as i32
    }

    /// Generate random f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        // 53 high bits give a uniform double strictly below 1.0
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Return `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
