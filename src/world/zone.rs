//! Zone coordinates on the toroidal world ring.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ZoneKeyError;

/// Largest absolute coordinate on either axis.
pub const RING_RADIUS: i32 = 10;

/// Number of distinct coordinates on one axis.
const AXIS_SPAN: i64 = 2 * RING_RADIUS as i64 + 1;

/// Wrap a coordinate onto the ring `[-R, R]`.
///
/// Stepping past `+R` lands on `-R` and vice versa.
#[must_use]
pub fn wrap_axis(v: i32) -> i32 {
    let shifted = (i64::from(v) + i64::from(RING_RADIUS)).rem_euclid(AXIS_SPAN);
    // rem_euclid result is in [0, AXIS_SPAN), always representable
    #[allow(clippy::cast_possible_truncation)]
    let wrapped = shifted as i32;
    wrapped - RING_RADIUS
}

/// A cardinal direction out of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards `y + 1`, the top edge of the grid.
    North,
    /// Towards `y - 1`, the bottom edge of the grid.
    South,
    /// Towards `x + 1`, the right edge of the grid.
    East,
    /// Towards `x - 1`, the left edge of the grid.
    West,
}

impl Direction {
    /// All directions, in exit-check order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// Identifies one zone of the world.
///
/// Always within the ring; construct with [`ZoneCoord::new`] (checked) or
/// [`ZoneCoord::wrapping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneCoord {
    x: i32,
    y: i32,
}

impl ZoneCoord {
    /// The safe origin zone.
    pub const ORIGIN: ZoneCoord = ZoneCoord { x: 0, y: 0 };

    /// Create a zone coordinate, rejecting values outside the ring.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneKeyError::OutOfRange`] if either axis exceeds the ring radius.
    pub fn new(x: i32, y: i32) -> Result<Self, ZoneKeyError> {
        if x.unsigned_abs() > RING_RADIUS.unsigned_abs() || y.unsigned_abs() > RING_RADIUS.unsigned_abs() {
            return Err(ZoneKeyError::OutOfRange { x, y });
        }
        Ok(Self { x, y })
    }

    /// Create a zone coordinate, wrapping each axis onto the ring.
    #[must_use]
    pub fn wrapping(x: i32, y: i32) -> Self {
        Self {
            x: wrap_axis(x),
            y: wrap_axis(y),
        }
    }

    /// X coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    /// Y coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// Chebyshev distance from the origin zone.
    #[must_use]
    pub const fn ring_distance(self) -> u32 {
        let ax = self.x.unsigned_abs();
        let ay = self.y.unsigned_abs();
        if ax > ay { ax } else { ay }
    }

    /// Difficulty level of the zone.
    ///
    /// Ring 0 is level 0, ring 1 is level 1, ring `r >= 2` is `(r - 1) * 10`.
    #[must_use]
    pub const fn level(self) -> u32 {
        match self.ring_distance() {
            0 => 0,
            1 => 1,
            r => (r - 1) * 10,
        }
    }

    /// Whether this is the safe origin zone.
    #[must_use]
    pub const fn is_safe(self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// The neighbouring zone in a direction, wrapping around the ring.
    #[must_use]
    pub fn neighbor(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::wrapping(self.x + dx, self.y + dy)
    }

    /// All four exits of this zone.
    #[must_use]
    pub fn exits(self) -> Exits {
        Exits {
            north: self.neighbor(Direction::North),
            south: self.neighbor(Direction::South),
            east: self.neighbor(Direction::East),
            west: self.neighbor(Direction::West),
        }
    }
}

impl Default for ZoneCoord {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for ZoneCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for ZoneCoord {
    type Err = ZoneKeyError;

    /// Parse `"{x}-{y}"`, e.g. `"3--7"` or `"-2-4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ZoneKeyError::Malformed(s.to_string());
        let trimmed = s.trim();

        // Skip a leading sign so the separator search lands after x's digits.
        let start = usize::from(trimmed.starts_with('-'));
        let sep = trimmed[start..].find('-').ok_or_else(malformed)? + start;

        let x: i32 = trimmed[..sep].trim().parse().map_err(|_| malformed())?;
        let y: i32 = trimmed[sep + 1..].trim().parse().map_err(|_| malformed())?;
        Self::new(x, y)
    }
}

impl TryFrom<String> for ZoneCoord {
    type Error = ZoneKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneCoord> for String {
    fn from(value: ZoneCoord) -> Self {
        value.to_string()
    }
}

/// Neighbouring zones reachable through each edge portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exits {
    /// Zone through the top portal.
    pub north: ZoneCoord,
    /// Zone through the bottom portal.
    pub south: ZoneCoord,
    /// Zone through the right portal.
    pub east: ZoneCoord,
    /// Zone through the left portal.
    pub west: ZoneCoord,
}

impl Exits {
    /// Exit in the given direction.
    #[must_use]
    pub const fn get(&self, dir: Direction) -> ZoneCoord {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}
