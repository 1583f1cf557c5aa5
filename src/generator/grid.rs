/*
grid.rs

Copyright 2025 Hervé Quatremain

This file is part of Waypath.

Waypath is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Waypath is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Waypath. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Grid model: cells, difficulty levels, and the immutable [`Puzzle`] object.
//!
//! A puzzle is a square grid of `N × N` cells. Some cells are waypoints, numbered from 1 to K,
//! and some cells are obstacles. A cell is never both.
//!
//! ```text
//! 1 . . .
//! . # . .
//! . 2 . #
//! . . . 3
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use strum_macros::FromRepr;

/// Largest grid size that [`Puzzle::new`] accepts.
pub const MAX_PUZZLE_GRID_SIZE: usize = 256;

/// Puzzle difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// All the levels, from the easiest to the hardest.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

/// Cell identifier.
///
/// The textual form, `"{row}-{col}"`, is the key used in JSON documents and on the command
/// line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    /// Create a [`CellId`] object.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the two cells share an edge (no diagonals, no wraparound).
    pub fn is_adjacent(&self, other: &CellId) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Return the cells that share an edge with this cell, inside a grid of the given size.
    pub fn neighbors(&self, grid_size: usize) -> Vec<CellId> {
        let mut ret: Vec<CellId> = Vec::with_capacity(4);

        if self.row > 0 {
            ret.push(CellId::new(self.row - 1, self.col));
        }
        if self.col + 1 < grid_size {
            ret.push(CellId::new(self.row, self.col + 1));
        }
        if self.row + 1 < grid_size {
            ret.push(CellId::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            ret.push(CellId::new(self.row, self.col - 1));
        }
        ret
    }
}

/// Whether the two cells share an edge.
pub fn adjacent(a: CellId, b: CellId) -> bool {
    a.is_adjacent(&b)
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

/// Error returned when a string is not a `"{row}-{col}"` cell key.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseCellIdError(String);

impl fmt::Display for ParseCellIdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid cell identifier {:?} (expected <row>-<col>)", self.0)
    }
}

impl Error for ParseCellIdError {}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ParseCellIdError(s.to_string()))?;
        let row: usize = row.parse().map_err(|_| ParseCellIdError(s.to_string()))?;
        let col: usize = col.parse().map_err(|_| ParseCellIdError(s.to_string()))?;
        Ok(CellId::new(row, col))
    }
}

impl From<CellId> for String {
    fn from(cell: CellId) -> Self {
        cell.to_string()
    }
}

impl TryFrom<String> for CellId {
    type Error = ParseCellIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parse a comma-separated list of cell keys, such as `"0-0,0-1,1-1"`.
pub fn parse_path(s: &str) -> Result<Vec<CellId>, ParseCellIdError> {
    s.split(',')
        .filter(|c| !c.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// A cell of the grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,

    /// Visit order if the cell is a waypoint.
    pub waypoint: Option<usize>,

    pub obstacle: bool,
}

/// Type of errors when building a [`Puzzle`] from data.
#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleError {
    /// The grid size is zero.
    EmptyGrid,

    /// The grid size is over [`MAX_PUZZLE_GRID_SIZE`].
    TooLarge(usize),

    /// A waypoint or an obstacle is outside the grid.
    OutOfBounds(CellId),

    /// A cell is both a waypoint and an obstacle.
    WaypointOnObstacle(CellId),

    /// The waypoint numbers do not form the 1..K sequence.
    BadSequence(Vec<usize>),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleError::EmptyGrid => write!(f, "the grid has no cells"),
            PuzzleError::TooLarge(n) => {
                write!(f, "grid size {n} is over the {MAX_PUZZLE_GRID_SIZE} limit")
            }
            PuzzleError::OutOfBounds(c) => write!(f, "cell {c} is outside the grid"),
            PuzzleError::WaypointOnObstacle(c) => {
                write!(f, "cell {c} is both a waypoint and an obstacle")
            }
            PuzzleError::BadSequence(s) => {
                write!(f, "waypoint numbers {s:?} are not a 1..K sequence")
            }
        }
    }
}

impl Error for PuzzleError {}

/// Serialized form of a [`Puzzle`].
///
/// Cells are not serialized: they are rebuilt from the grid size, the waypoints, and the
/// obstacles.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PuzzleData {
    pub id: String,
    pub grid_size: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub waypoints: BTreeMap<CellId, usize>,
    #[serde(default)]
    pub obstacles: BTreeSet<CellId>,
}

/// Immutable puzzle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(into = "PuzzleData", try_from = "PuzzleData")]
pub struct Puzzle {
    /// Identifier for bookkeeping by the callers.
    id: String,

    grid_size: usize,

    difficulty: Difficulty,

    /// All the `N²` cells, row by row.
    cells: Vec<Cell>,

    /// Waypoint sequence numbers indexed by cell.
    waypoints: BTreeMap<CellId, usize>,

    /// Waypoints sorted by sequence number. Index 0 is waypoint 1.
    ordered_waypoints: Vec<CellId>,

    obstacles: BTreeSet<CellId>,
}

impl Puzzle {
    /// Create a [`Puzzle`] object.
    ///
    /// # Errors
    ///
    /// The method returns an error when the grid size is zero or over
    /// [`MAX_PUZZLE_GRID_SIZE`], when a cell is outside the grid, when a waypoint is also an
    /// obstacle, or when the waypoint numbers are not exactly `1..=K`.
    pub fn new(
        id: &str,
        grid_size: usize,
        difficulty: Difficulty,
        waypoints: BTreeMap<CellId, usize>,
        obstacles: BTreeSet<CellId>,
    ) -> Result<Self, PuzzleError> {
        if grid_size == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        if grid_size > MAX_PUZZLE_GRID_SIZE {
            return Err(PuzzleError::TooLarge(grid_size));
        }
        for cell in waypoints.keys().chain(obstacles.iter()) {
            if cell.row >= grid_size || cell.col >= grid_size {
                return Err(PuzzleError::OutOfBounds(*cell));
            }
        }
        if let Some(cell) = waypoints.keys().find(|c| obstacles.contains(c)) {
            return Err(PuzzleError::WaypointOnObstacle(*cell));
        }

        // Sequence numbers must be 1..=K, each exactly once
        let mut sequence: Vec<(usize, CellId)> =
            waypoints.iter().map(|(c, n)| (*n, *c)).collect();
        sequence.sort_unstable();
        if sequence.iter().enumerate().any(|(i, (n, _))| *n != i + 1) {
            return Err(PuzzleError::BadSequence(
                sequence.iter().map(|(n, _)| *n).collect(),
            ));
        }

        let mut cells: Vec<Cell> = Vec::with_capacity(grid_size * grid_size);
        for row in 0..grid_size {
            for col in 0..grid_size {
                let id: CellId = CellId::new(row, col);
                cells.push(Cell {
                    id,
                    waypoint: waypoints.get(&id).copied(),
                    obstacle: obstacles.contains(&id),
                });
            }
        }

        Ok(Self {
            id: id.to_string(),
            grid_size,
            difficulty,
            cells,
            waypoints,
            ordered_waypoints: sequence.into_iter().map(|(_, c)| c).collect(),
            obstacles,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Return all the cells, row by row.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Return the waypoint sequence numbers indexed by cell.
    pub fn waypoints(&self) -> &BTreeMap<CellId, usize> {
        &self.waypoints
    }

    /// Return the waypoints in visit order.
    pub fn ordered_waypoints(&self) -> &[CellId] {
        &self.ordered_waypoints
    }

    pub fn obstacles(&self) -> &BTreeSet<CellId> {
        &self.obstacles
    }

    /// Return the cell at the given position, or None if the position is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.grid_size || col >= self.grid_size {
            return None;
        }
        self.cells.get(row * self.grid_size + col)
    }

    /// Whether the cell is inside the grid.
    pub fn contains(&self, cell: CellId) -> bool {
        cell.row < self.grid_size && cell.col < self.grid_size
    }

    pub fn is_obstacle(&self, cell: CellId) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Return the sequence number of the cell if it is a waypoint.
    pub fn waypoint_number(&self, cell: CellId) -> Option<usize> {
        self.waypoints.get(&cell).copied()
    }

    /// Number of cells a solution must go through: `N² - |obstacles|`.
    pub fn available_cell_count(&self) -> usize {
        self.grid_size * self.grid_size - self.obstacles.len()
    }
}

/// Number of cells a solution must go through.
pub fn available_cell_count(puzzle: &Puzzle) -> usize {
    puzzle.available_cell_count()
}

impl From<Puzzle> for PuzzleData {
    fn from(puzzle: Puzzle) -> Self {
        Self {
            id: puzzle.id,
            grid_size: puzzle.grid_size,
            difficulty: puzzle.difficulty,
            waypoints: puzzle.waypoints,
            obstacles: puzzle.obstacles,
        }
    }
}

impl TryFrom<PuzzleData> for Puzzle {
    type Error = PuzzleError;

    fn try_from(data: PuzzleData) -> Result<Self, Self::Error> {
        Puzzle::new(
            &data.id,
            data.grid_size,
            data.difficulty,
            data.waypoints,
            data.obstacles,
        )
    }
}

/// "ASCII art" rendering of the puzzle: `.` for free cells, `#` for obstacles, and the sequence
/// number for waypoints.
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.grid_size) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match (cell.waypoint, cell.obstacle) {
                    (Some(n), _) => n.to_string(),
                    (None, true) => "#".to_string(),
                    (None, false) => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
