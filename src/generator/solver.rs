/*
solver.rs

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

//! Search for a solution path.
//!
//! The search is a depth-first walk over the free cells. A branch is dropped as soon as:
//!
//! - it reaches a waypoint that is not the next one in sequence,
//! - the remaining free cells are not all reachable from the current cell,
//! - a remaining free cell has no way in or out anymore.
//!
//! The search is bounded in time. For large grids with few obstacles the search space is huge,
//! and the caller should treat [`SolverError::DurationExceeded`] as "unknown" rather than
//! "unsolvable".

use log::debug;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::grid::{CellId, Puzzle};
use super::path;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum SolverError {
    /// No possible path.
    NoPath,

    /// No path found before the timeout.
    DurationExceeded,
}

/// [`Solver`] object.
pub struct Solver<'a> {
    puzzle: &'a Puzzle,

    /// Number of cells the solution must contain.
    num_cells: usize,

    /// Maximum duration of a search.
    max_time: Duration,

    /// Number of iterations it took for the last search.
    pub iteration: usize,

    /// Duration in seconds it took for the last search.
    pub duration: f32,

    /// Time when the search started. Used to compute the [`Solver::duration`].
    start: Instant,
}

impl<'a> Solver<'a> {
    /// Create the object.
    pub fn new(puzzle: &'a Puzzle, max_time: Duration) -> Self {
        Self {
            puzzle,
            num_cells: puzzle.available_cell_count(),
            max_time,
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Search and return a solution path.
    ///
    /// # Errors
    ///
    /// The method returns an error if the puzzle has no solution, or if the search takes longer
    /// than the maximum duration.
    pub fn solve(&mut self) -> Result<Vec<CellId>, SolverError> {
        self.iteration = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let mut path: path::Path = path::Path::new(self.num_cells);
        let mut res: Result<(), SolverError> = Err(SolverError::NoPath);

        for start in self.starting_cells() {
            res = self.find_path(start, 0, &mut path);
            if res != Err(SolverError::NoPath) {
                break;
            }
        }
        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Puzzle {}: iterations = {}  duration = {}  result = {:?}",
            self.puzzle.id(),
            self.iteration,
            self.duration,
            res
        );
        res.map(|()| path.get().to_vec())
    }

    /// Return the candidate starting cells.
    ///
    /// Cells with few free neighbors come first: such a cell must be an end of the path, so it
    /// is the most likely starting point. Waypoints other than the first one cannot start the
    /// path.
    fn starting_cells(&self) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self
            .puzzle
            .cells()
            .iter()
            .filter(|c| !c.obstacle && c.waypoint.is_none_or(|n| n == 1))
            .map(|c| c.id)
            .collect();
        cells.sort_by_key(|c| self.free_neighbors(*c).len());
        cells
    }

    /// Return the neighbors that are not obstacles.
    fn free_neighbors(&self, cell: CellId) -> Vec<CellId> {
        cell.neighbors(self.puzzle.grid_size())
            .into_iter()
            .filter(|c| !self.puzzle.is_obstacle(*c))
            .collect()
    }

    /// Recursively find a path.
    ///
    /// `consumed` is the number of waypoints already in the path.
    fn find_path(
        &mut self,
        cell: CellId,
        consumed: usize,
        path: &mut path::Path,
    ) -> Result<(), SolverError> {
        let ordered: &[CellId] = self.puzzle.ordered_waypoints();
        let consumed: usize = match self.puzzle.waypoint_number(cell) {
            Some(_) if ordered.get(consumed) == Some(&cell) => consumed + 1,
            Some(_) => return Err(SolverError::NoPath),
            None => consumed,
        };

        path.push(cell);
        if path.len() == self.num_cells {
            if consumed == ordered.len() {
                return Ok(());
            }
            path.pop();
            return Err(SolverError::NoPath);
        }

        self.iteration += 1;
        if self.start.elapsed() >= self.max_time {
            return Err(SolverError::DurationExceeded);
        }

        if !self.remaining_is_viable(cell, path) {
            path.pop();
            return Err(SolverError::NoPath);
        }

        // Try the most constrained neighbors first
        let mut next: Vec<CellId> = self
            .free_neighbors(cell)
            .into_iter()
            .filter(|c| !path.contains(*c))
            .collect();
        next.sort_by_key(|c| {
            self.free_neighbors(*c)
                .iter()
                .filter(|n| !path.contains(**n))
                .count()
        });

        for n in next {
            match self.find_path(n, consumed, path) {
                Ok(()) => return Ok(()),
                Err(SolverError::DurationExceeded) => return Err(SolverError::DurationExceeded),
                Err(SolverError::NoPath) => (),
            }
        }
        path.pop();
        Err(SolverError::NoPath)
    }

    /// Whether the cells that are not in the path can still be covered from the current cell.
    fn remaining_is_viable(&self, current: CellId, path: &path::Path) -> bool {
        let remaining: usize = self.num_cells - path.len();

        // Flood fill from the current cell through the unvisited cells
        let mut reached: usize = 0;
        let mut seen: Vec<bool> = vec![false; self.puzzle.grid_size() * self.puzzle.grid_size()];
        let index = |c: CellId| c.row * self.puzzle.grid_size() + c.col;
        let mut queue: VecDeque<CellId> = VecDeque::from([current]);
        seen[index(current)] = true;

        // Unvisited cells with only one way in can only be the end of the path. More than one
        // such cell is a dead end.
        let mut dead_ends: usize = 0;

        while let Some(c) = queue.pop_front() {
            for n in self.free_neighbors(c) {
                if path.contains(n) || seen[index(n)] {
                    continue;
                }
                seen[index(n)] = true;
                reached += 1;
                let exits: usize = self
                    .free_neighbors(n)
                    .iter()
                    .filter(|x| !path.contains(**x) || **x == current)
                    .count();
                if exits <= 1 {
                    dead_ends += 1;
                }
                queue.push_back(n);
            }
        }
        reached == remaining && dead_ends <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::Difficulty;
    use crate::validator;
    use std::collections::{BTreeMap, BTreeSet};

    fn puzzle(size: usize, waypoints: &[(usize, usize)], obstacles: &[(usize, usize)]) -> Puzzle {
        Puzzle::new(
            "solver",
            size,
            Difficulty::Hard,
            waypoints
                .iter()
                .enumerate()
                .map(|(i, (r, c))| (CellId::new(*r, *c), i + 1))
                .collect::<BTreeMap<CellId, usize>>(),
            obstacles
                .iter()
                .map(|(r, c)| CellId::new(*r, *c))
                .collect::<BTreeSet<CellId>>(),
        )
        .unwrap()
    }

    #[test]
    fn finds_a_valid_path() {
        let p = puzzle(3, &[(0, 0), (1, 1), (2, 2)], &[]);
        let mut solver = Solver::new(&p, Duration::from_secs(5));
        let path = solver.solve().unwrap();
        assert!(validator::is_valid(&path, &p));
    }

    #[test]
    fn works_around_obstacles() {
        // Only the ring around the center is free
        let p = puzzle(3, &[(0, 0), (0, 2), (2, 2)], &[(1, 1)]);
        let mut solver = Solver::new(&p, Duration::from_secs(5));
        let path = solver.solve().unwrap();
        assert_eq!(path.len(), 8);
        assert!(!path.contains(&CellId::new(1, 1)));
        assert!(validator::is_valid(&path, &p));

        // Wall in the middle of the second row
        let p = puzzle(4, &[(0, 0), (3, 3)], &[(1, 1), (1, 2)]);
        let mut solver = Solver::new(&p, Duration::from_secs(5));
        let path = solver.solve().unwrap();
        assert_eq!(path.len(), 14);
        assert!(validator::is_valid(&path, &p));
    }

    #[test]
    fn detects_unsolvable_puzzle() {
        // The corner cell 0-0 is cut off by the obstacles
        let p = puzzle(3, &[(2, 2)], &[(0, 1), (1, 0)]);
        let mut solver = Solver::new(&p, Duration::from_secs(5));
        assert_eq!(solver.solve(), Err(SolverError::NoPath));
    }

    #[test]
    fn detects_impossible_order() {
        // The obstacle makes 0-0 and 0-2 the two ends of any path, so waypoint 3 cannot come
        // after waypoint 2
        let p = puzzle(3, &[(0, 0), (0, 2), (1, 1)], &[(0, 1)]);
        let mut solver = Solver::new(&p, Duration::from_secs(5));
        assert_eq!(solver.solve(), Err(SolverError::NoPath));
    }

    #[test]
    fn larger_open_grid() {
        let p = puzzle(5, &[(0, 0), (2, 2), (4, 4)], &[]);
        let mut solver = Solver::new(&p, Duration::from_secs(10));
        let path = solver.solve().unwrap();
        assert_eq!(path.len(), 25);
        assert!(validator::is_valid(&path, &p));
    }
}
