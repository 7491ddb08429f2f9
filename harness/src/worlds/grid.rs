//! `Grid`: four-neighbour grid world.
//!
//! Cells are addressed by `(row, col)` from the top-left corner. Each open
//! tile carries an entry cost (the cost of the edge *into* it), so an
//! all-`.` grid has unit edges and Manhattan distance is an exact lower
//! bound. Walls are never entered.
//!
//! Text form, one line per row:
//!
//! ```text
//! ..#
//! .3.
//! ...
//! ```
//!
//! `.` is an open tile with entry cost 1, `1`-`9` an open tile with that entry
//! cost, `#` a wall.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use waypoint_search::contract::{Expander, Successor};

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Fixed-width little-endian encoding, for fingerprinted explored sets.
    #[must_use]
    pub fn identity_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8);
        out.extend_from_slice(&self.row.to_le_bytes());
        out.extend_from_slice(&self.col.to_le_bytes());
        out
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Manhattan distance between two cells.
///
/// Admissible and consistent on any grid whose entry costs are at least 1.
#[must_use]
pub fn manhattan(a: Cell, b: Cell) -> f64 {
    f64::from(a.row.abs_diff(b.row)) + f64::from(a.col.abs_diff(b.col))
}

/// Contents of one grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    Open { entry_cost: u8 },
    Wall,
}

impl Tile {
    const PLAIN: Self = Self::Open { entry_cost: 1 };

    fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Open { entry_cost: 1 } => '.',
            Self::Open { entry_cost } => char::from_digit(u32::from(entry_cost), 10).unwrap_or('?'),
        }
    }
}

/// Reasons a grid description is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or a row with no tiles.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside `.`, `#` and `1`-`9`.
    UnknownTile { row: usize, col: usize, tile: char },
    /// A coordinate or size does not fit the grid.
    OutOfBounds { detail: String },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no tiles"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} tiles, expected {expected}"),
            Self::UnknownTile { row, col, tile } => {
                write!(f, "unknown tile {tile:?} at ({row},{col})")
            }
            Self::OutOfBounds { detail } => write!(f, "out of bounds: {detail}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Rectangular four-neighbour grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// A `rows` × `cols` grid of unit-cost open tiles.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] if either dimension is zero.
    pub fn open(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            tiles: vec![Tile::PLAIN; rows as usize * cols as usize],
        })
    }

    /// Parse the text form described in the module docs. Surrounding
    /// whitespace on each line and blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] for empty, ragged or unrecognised input.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.first().map_or(0, |line| line.chars().count());
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(lines.len() * width);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '.' => Tile::PLAIN,
                    '#' => Tile::Wall,
                    '1'..='9' => Tile::Open {
                        entry_cost: u8::try_from(ch).map_or(1, |byte| byte - b'0'),
                    },
                    _ => return Err(GridError::UnknownTile { row, col, tile: ch }),
                };
                tiles.push(tile);
            }
        }

        let rows = u32::try_from(lines.len()).map_err(|_| GridError::OutOfBounds {
            detail: format!("{} rows", lines.len()),
        })?;
        let cols = u32::try_from(width).map_err(|_| GridError::OutOfBounds {
            detail: format!("{width} columns"),
        })?;
        Ok(Self { rows, cols, tiles })
    }

    /// A seeded random grid with roughly `wall_per_mille`/1000 of its tiles
    /// walled and the rest open with entry costs 1-4. The two corners
    /// `(0,0)` and [`Grid::far_corner`] are always open. Same seed, same grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] if either dimension is zero.
    pub fn scattered(
        rows: u32,
        cols: u32,
        wall_per_mille: u32,
        seed: u64,
    ) -> Result<Self, GridError> {
        let mut grid = Self::open(rows, cols)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        for tile in &mut grid.tiles {
            *tile = if rng.gen_range(0..1000) < wall_per_mille {
                Tile::Wall
            } else {
                Tile::Open {
                    entry_cost: rng.gen_range(1..=4),
                }
            };
        }
        let far = grid.far_corner();
        for corner in [Cell::new(0, 0), far] {
            if let Some(index) = grid.index(corner) {
                grid.tiles[index] = Tile::PLAIN;
            }
        }
        Ok(grid)
    }

    /// Wall off `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `cell` is outside the grid.
    pub fn with_wall(mut self, cell: Cell) -> Result<Self, GridError> {
        let index = self.checked_index(cell)?;
        self.tiles[index] = Tile::Wall;
        Ok(self)
    }

    /// Make `cell` open with the given entry cost (a whole number 1-9).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `cell` is outside the grid or
    /// the cost is outside 1-9.
    pub fn with_entry_cost(mut self, cell: Cell, entry_cost: u8) -> Result<Self, GridError> {
        if !(1..=9).contains(&entry_cost) {
            return Err(GridError::OutOfBounds {
                detail: format!("entry cost {entry_cost} not in 1..=9"),
            });
        }
        let index = self.checked_index(cell)?;
        self.tiles[index] = Tile::Open { entry_cost };
        Ok(self)
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Bottom-right cell.
    #[must_use]
    pub fn far_corner(&self) -> Cell {
        Cell::new(self.rows - 1, self.cols - 1)
    }

    #[must_use]
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        matches!(self.tile(cell), Some(Tile::Open { .. }))
    }

    /// Number of open tiles.
    #[must_use]
    pub fn open_cells(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, Tile::Open { .. }))
            .count()
    }

    /// Open neighbours of `cell` with their entry costs, in the fixed order
    /// up, right, down, left.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> Vec<(Cell, f64)> {
        let candidates = [
            cell.row.checked_sub(1).map(|row| Cell::new(row, cell.col)),
            cell.col.checked_add(1).map(|col| Cell::new(cell.row, col)),
            cell.row.checked_add(1).map(|row| Cell::new(row, cell.col)),
            cell.col.checked_sub(1).map(|col| Cell::new(cell.row, col)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter_map(|next| match self.tile(next)? {
                Tile::Open { entry_cost } => Some((next, f64::from(entry_cost))),
                Tile::Wall => None,
            })
            .collect()
    }

    /// Text form of the grid; [`Grid::parse`] reads it back.
    #[must_use]
    pub fn render(&self) -> String {
        self.tiles
            .chunks(self.cols as usize)
            .map(|row| row.iter().map(|tile| tile.glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Convert to a `serde_json::Value` with sorted keys.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cols": self.cols,
            "open_cells": self.open_cells(),
            "rows": self.rows,
            "tiles": self.render().lines().collect::<Vec<_>>(),
        })
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols)
            .then(|| cell.row as usize * self.cols as usize + cell.col as usize)
    }

    fn checked_index(&self, cell: Cell) -> Result<usize, GridError> {
        self.index(cell).ok_or_else(|| GridError::OutOfBounds {
            detail: format!("{cell} outside {}x{} grid", self.rows, self.cols),
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Expander<Cell> for Grid {
    type Successors = std::vec::IntoIter<Successor<Cell>>;

    fn successors(&self, state: &Cell) -> Self::Successors {
        self.neighbors(*state)
            .into_iter()
            .map(|(cell, cost)| Successor::new(cell, cost))
            .collect::<Vec<_>>()
            .into_iter()
    }
}
