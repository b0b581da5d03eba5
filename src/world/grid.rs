//! Fixed-size tile grid of a single zone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::world::{Direction, TileType};

/// Side length of every zone grid.
pub const GRID_SIZE: usize = 18;

/// Index of the portal gap on each border edge.
pub const PORTAL_INDEX: usize = GRID_SIZE / 2;

/// Largest valid cell index.
const LAST: i32 = GRID_SIZE as i32 - 1;

/// A cell position inside a zone grid.
///
/// Signed so that requests pointing outside the grid are representable and
/// can be rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Column, 0 is the west edge.
    pub x: i32,
    /// Row, 0 is the north edge.
    pub y: i32,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance to another cell.
    #[must_use]
    pub const fn chebyshev(self, other: Cell) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    /// Check if the cell lies inside a zone grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x <= LAST && self.y <= LAST
    }

    /// The grid edge this cell lies on, if any.
    ///
    /// Corners report the north/south edge first, matching exit priority.
    #[must_use]
    pub const fn edge(self) -> Option<Direction> {
        if !self.in_bounds() {
            None
        } else if self.y == 0 {
            Some(Direction::North)
        } else if self.y == LAST {
            Some(Direction::South)
        } else if self.x == 0 {
            Some(Direction::West)
        } else if self.x == LAST {
            Some(Direction::East)
        } else {
            None
        }
    }

    /// Where a player arrives after leaving a zone through `dir`.
    ///
    /// The player enters the neighbour one cell inside the opposite edge,
    /// keeping the coordinate along the edge.
    #[must_use]
    pub const fn entry_after(self, dir: Direction) -> Cell {
        match dir {
            Direction::North => Cell::new(self.x, LAST - 1),
            Direction::South => Cell::new(self.x, 1),
            Direction::West => Cell::new(LAST - 1, self.y),
            Direction::East => Cell::new(1, self.y),
        }
    }

    #[allow(clippy::cast_sign_loss)]
    const fn index(self) -> Option<(usize, usize)> {
        if self.in_bounds() {
            Some((self.y as usize, self.x as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tiles of one zone, stored row-major (`rows[y][x]`).
#[allow(missing_copy_implementations)] // 324 tiles, shared behind `Arc<ZoneInfo>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneGrid {
    rows: [[TileType; GRID_SIZE]; GRID_SIZE],
}

impl ZoneGrid {
    /// Create a grid filled with one tile type.
    #[must_use]
    pub const fn filled(tile: TileType) -> Self {
        Self {
            rows: [[tile; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Create the base canvas: ground, walled border, portal gaps.
    #[must_use]
    pub fn bordered() -> Self {
        let mut grid = Self::filled(TileType::Ground);
        grid.reassert_border();
        grid
    }

    /// Parse a grid from symbol rows (see [`TileType::symbol`]).
    ///
    /// # Errors
    ///
    /// Returns an error on unknown symbols or when the grid is not 18×18.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        if rows.len() != GRID_SIZE {
            return Err(GridError::RowCount {
                len: rows.len(),
                expected: GRID_SIZE,
            });
        }

        let mut grid = Self::filled(TileType::Ground);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != GRID_SIZE {
                return Err(GridError::Shape {
                    row: y,
                    len,
                    expected: GRID_SIZE,
                });
            }
            for (x, c) in row.chars().enumerate() {
                grid.rows[y][x] = TileType::try_from(c)?;
            }
        }
        Ok(grid)
    }

    /// Get the tile at a cell, or `None` outside the grid.
    #[must_use]
    pub const fn get(&self, cell: Cell) -> Option<TileType> {
        match cell.index() {
            Some((row, col)) => Some(self.rows[row][col]),
            None => None,
        }
    }

    /// Set the tile at a cell.
    ///
    /// Returns `false` if the cell is outside the grid.
    pub fn set(&mut self, cell: Cell, tile: TileType) -> bool {
        if let Some((row, col)) = cell.index() {
            self.rows[row][col] = tile;
            true
        } else {
            false
        }
    }

    /// Check if a cell holds plain ground.
    #[must_use]
    pub fn is_ground(&self, cell: Cell) -> bool {
        self.get(cell) == Some(TileType::Ground)
    }

    /// Force walls on the border and portals at each edge midpoint.
    pub fn reassert_border(&mut self) {
        for i in 0..GRID_SIZE {
            for (row, col) in [(0, i), (GRID_SIZE - 1, i), (i, 0), (i, GRID_SIZE - 1)] {
                if self.rows[row][col] != TileType::Portal {
                    self.rows[row][col] = TileType::Wall;
                }
            }
        }
        self.rows[0][PORTAL_INDEX] = TileType::Portal;
        self.rows[GRID_SIZE - 1][PORTAL_INDEX] = TileType::Portal;
        self.rows[PORTAL_INDEX][0] = TileType::Portal;
        self.rows[PORTAL_INDEX][GRID_SIZE - 1] = TileType::Portal;
    }

    /// Iterate over all cells and tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, TileType)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &tile)| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let cell = Cell::new(x as i32, y as i32);
                (cell, tile)
            })
        })
    }

    /// Iterate over cells holding the given tile type.
    pub fn cells_of(&self, tile: TileType) -> impl Iterator<Item = Cell> + '_ {
        self.iter().filter(move |&(_, t)| t == tile).map(|(c, _)| c)
    }

    /// Count tiles of a type.
    #[must_use]
    pub fn count(&self, tile: TileType) -> usize {
        self.rows.iter().flatten().filter(|&&t| t == tile).count()
    }

    /// Render rows as symbol strings.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|t| t.symbol()).collect())
            .collect()
    }
}

impl fmt::Display for ZoneGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bordered_canvas() {
        let grid = ZoneGrid::bordered();
        assert_eq!(grid.count(TileType::Portal), 4);
        // 4 edges of 18 minus shared corners minus portals
        assert_eq!(grid.count(TileType::Wall), 4 * 17 - 4);
        assert_eq!(grid.get(Cell::new(9, 0)), Some(TileType::Portal));
        assert_eq!(grid.get(Cell::new(9, 17)), Some(TileType::Portal));
        assert_eq!(grid.get(Cell::new(0, 9)), Some(TileType::Portal));
        assert_eq!(grid.get(Cell::new(17, 9)), Some(TileType::Portal));
        assert_eq!(grid.get(Cell::new(5, 5)), Some(TileType::Ground));
    }

    #[test]
    fn test_get_set_bounds() {
        let mut grid = ZoneGrid::bordered();
        assert!(grid.set(Cell::new(3, 4), TileType::Tree));
        assert_eq!(grid.get(Cell::new(3, 4)), Some(TileType::Tree));
        assert!(!grid.set(Cell::new(18, 0), TileType::Tree));
        assert_eq!(grid.get(Cell::new(-1, 0)), None);
        assert_eq!(grid.get(Cell::new(0, 18)), None);
    }

    #[test]
    fn test_reassert_border_overrides() {
        let mut grid = ZoneGrid::bordered();
        grid.set(Cell::new(0, 3), TileType::Tree);
        grid.set(Cell::new(9, 0), TileType::Shop);
        grid.reassert_border();
        assert_eq!(grid.get(Cell::new(0, 3)), Some(TileType::Wall));
        assert_eq!(grid.get(Cell::new(9, 0)), Some(TileType::Portal));
    }

    #[test]
    fn test_rows_round_trip() {
        let mut grid = ZoneGrid::bordered();
        grid.set(Cell::new(4, 4), TileType::Enemy);
        grid.set(Cell::new(4, 5), TileType::EnemyZone);
        let rows = grid.to_rows();
        assert_eq!(rows[0], "WWWWWWWWWPWWWWWWWW");
        assert_eq!(ZoneGrid::from_rows(&rows).unwrap(), grid);
    }

    #[test]
    fn test_from_rows_errors() {
        let mut rows = ZoneGrid::bordered().to_rows();
        rows[3].replace_range(2..3, "?");
        assert!(matches!(
            ZoneGrid::from_rows(&rows),
            Err(GridError::UnknownTile(_))
        ));
        assert_eq!(
            ZoneGrid::from_rows(&rows[..5]),
            Err(GridError::RowCount { len: 5, expected: 18 })
        );
        assert_eq!(
            GridError::RowCount { len: 5, expected: 18 }.to_string(),
            "grid has 5 rows, expected 18"
        );

        let mut rows = ZoneGrid::bordered().to_rows();
        rows[7].push('.');
        assert_eq!(
            ZoneGrid::from_rows(&rows),
            Err(GridError::Shape {
                row: 7,
                len: 19,
                expected: 18
            })
        );
    }

    #[test]
    fn test_cell_edges() {
        assert_eq!(Cell::new(9, 0).edge(), Some(Direction::North));
        assert_eq!(Cell::new(9, 17).edge(), Some(Direction::South));
        assert_eq!(Cell::new(0, 9).edge(), Some(Direction::West));
        assert_eq!(Cell::new(17, 9).edge(), Some(Direction::East));
        assert_eq!(Cell::new(5, 5).edge(), None);
        assert_eq!(Cell::new(-1, 5).edge(), None);
    }

    #[test]
    fn test_entry_after_transition() {
        let portal = Cell::new(9, 0);
        assert_eq!(portal.entry_after(Direction::North), Cell::new(9, 16));
        assert_eq!(Cell::new(9, 17).entry_after(Direction::South), Cell::new(9, 1));
        assert_eq!(Cell::new(0, 9).entry_after(Direction::West), Cell::new(16, 9));
        assert_eq!(Cell::new(17, 9).entry_after(Direction::East), Cell::new(1, 9));
    }

    #[test]
    fn test_chebyshev() {
        assert_eq!(Cell::new(4, 4).chebyshev(Cell::new(5, 5)), 1);
        assert_eq!(Cell::new(4, 4).chebyshev(Cell::new(4, 6)), 2);
        assert_eq!(Cell::new(4, 4).chebyshev(Cell::new(4, 4)), 0);
    }
}
