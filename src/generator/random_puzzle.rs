/*
random_puzzle.rs

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

//! Generate a random puzzle.
//!
//! Generation never fails. Waypoints and obstacles are placed by random draws, with a bounded
//! number of draws per cell. When the draws are exhausted the cell is skipped, so a puzzle can
//! end up with fewer waypoints or obstacles than requested. [`Generator::generate`] does not
//! check that the puzzle has a solution; [`Generator::generate_verified`] does, by running the
//! [`solver::Solver`] on each candidate.

use log::{Level, debug, log_enabled, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use super::grid::{CellId, Difficulty, Puzzle};
use super::solver;
use crate::config::EngineConfig;

/// Puzzle generator.
pub struct Generator {
    config: EngineConfig,

    rng: StdRng,

    /// Number of puzzles generated so far. Used to build unique puzzle identifiers.
    counter: u64,
}

impl Generator {
    /// Create a [`Generator`] object seeded from the operating system.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
            counter: 0,
        }
    }

    /// Create a [`Generator`] object that always produces the same sequence of puzzles.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            counter: 0,
        }
    }

    /// Return a new puzzle identifier: `<timestamp in ms>-<counter>`.
    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", chrono::Utc::now().timestamp_millis(), self.counter)
    }

    /// Draw a random cell that is not in `used`.
    ///
    /// Return None if all the draws hit used cells.
    fn draw_free_cell(&mut self, grid_size: usize, used: &BTreeSet<CellId>) -> Option<CellId> {
        for _ in 0..self.config.max_generation_attempts {
            let cell: CellId = CellId::new(
                self.rng.random_range(0..grid_size),
                self.rng.random_range(0..grid_size),
            );
            if !used.contains(&cell) {
                return Some(cell);
            }
        }
        None
    }

    /// Generate and return a random puzzle.
    ///
    /// The grid size is clamped to the configured range.
    pub fn generate(&mut self, grid_size: usize, difficulty: Difficulty) -> Puzzle {
        let grid_size: usize = self.config.clamp_grid_size(grid_size);
        let num_waypoints: usize = grid_size.min(self.config.max_numbered_cells);
        let mut used: BTreeSet<CellId> = BTreeSet::new();
        let mut waypoints: BTreeMap<CellId, usize> = BTreeMap::new();

        // The first waypoint is in one of the corners
        if num_waypoints > 0 {
            let last: usize = grid_size - 1;
            let corners: [CellId; 4] = [
                CellId::new(0, 0),
                CellId::new(0, last),
                CellId::new(last, 0),
                CellId::new(last, last),
            ];
            let first: CellId = corners[self.rng.random_range(0..corners.len())];
            used.insert(first);
            waypoints.insert(first, 1);
        }

        for i in 1..num_waypoints {
            match self.draw_free_cell(grid_size, &used) {
                Some(cell) => {
                    used.insert(cell);
                    waypoints.insert(cell, waypoints.len() + 1);
                }
                None => warn!("Cannot place waypoint {}: draws exhausted", i + 1),
            }
        }

        let budget: usize = self.config.obstacle_budget(grid_size, difficulty);
        let mut obstacles: BTreeSet<CellId> = BTreeSet::new();
        for i in 0..budget {
            match self.draw_free_cell(grid_size, &used) {
                Some(cell) => {
                    used.insert(cell);
                    obstacles.insert(cell);
                }
                None => warn!("Cannot place obstacle {}/{budget}: draws exhausted", i + 1),
            }
        }

        let id: String = self.next_id();
        debug!(
            "Puzzle {id}: size = {grid_size}  difficulty = {difficulty}  waypoints = {}/{num_waypoints}  obstacles = {}/{budget}",
            waypoints.len(),
            obstacles.len()
        );

        // Waypoints and obstacles come from the same set of used cells and are numbered in
        // placement order, so the puzzle invariants hold.
        let puzzle: Puzzle = match Puzzle::new(&id, grid_size, difficulty, waypoints, obstacles)
        {
            Ok(p) => p,
            Err(e) => unreachable!("Bug: generated puzzle {id} is inconsistent: {e}"),
        };
        if log_enabled!(Level::Debug) {
            debug!("\n{puzzle}");
        }
        puzzle
    }

    /// Generate a puzzle that has a solution.
    ///
    /// Up to [`EngineConfig::max_verify_attempts`] random puzzles are generated. The first one
    /// for which the solver finds a path is returned, with that path.
    /// Return None if no solvable puzzle has been found.
    pub fn generate_verified(
        &mut self,
        grid_size: usize,
        difficulty: Difficulty,
    ) -> Option<(Puzzle, Vec<CellId>)> {
        let max_time: Duration = Duration::from_millis(self.config.solver_max_time_ms);

        for attempt in 1..=self.config.max_verify_attempts {
            let puzzle: Puzzle = self.generate(grid_size, difficulty);
            let mut s: solver::Solver = solver::Solver::new(&puzzle, max_time);
            match s.solve() {
                Ok(path) => {
                    debug!("Solvable puzzle found after {attempt} attempt(s)");
                    return Some((puzzle, path));
                }
                Err(e) => debug!("Puzzle {} rejected: {e:?}", puzzle.id()),
            }
        }
        warn!(
            "No solvable {difficulty} puzzle of size {grid_size} after {} attempts",
            self.config.max_verify_attempts
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator;

    #[test]
    fn generated_puzzles_respect_invariants() {
        let config = EngineConfig::default();
        let mut g = Generator::with_seed(config.clone(), 42);

        for size in 1..=10 {
            for difficulty in Difficulty::ALL {
                for _ in 0..10 {
                    let p = g.generate(size, difficulty);
                    let n = size.clamp(3, 8);
                    assert_eq!(p.grid_size(), n);
                    assert_eq!(p.cells().len(), n * n);

                    // Contiguous 1..K
                    let mut numbers: Vec<usize> = p.waypoints().values().copied().collect();
                    numbers.sort_unstable();
                    assert_eq!(numbers, (1..=numbers.len()).collect::<Vec<usize>>());
                    assert!(numbers.len() <= n.min(6));
                    assert!(!numbers.is_empty());

                    assert!(p.waypoints().keys().all(|c| !p.is_obstacle(*c)));
                    assert!(p.obstacles().len() <= config.obstacle_budget(n, difficulty));
                    if difficulty == Difficulty::Easy {
                        assert!(p.obstacles().is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn first_waypoint_is_a_corner() {
        let mut g = Generator::with_seed(EngineConfig::default(), 7);
        for _ in 0..50 {
            let p = g.generate(5, Difficulty::Medium);
            let first = p.ordered_waypoints()[0];
            assert!(first.row == 0 || first.row == 4);
            assert!(first.col == 0 || first.col == 4);
        }
    }

    #[test]
    fn full_counts_on_large_grid() {
        let mut g = Generator::with_seed(EngineConfig::default(), 3);
        let p = g.generate(8, Difficulty::Expert);
        assert_eq!(p.waypoints().len(), 6);
        assert_eq!(p.obstacles().len(), 9);
        assert_eq!(p.available_cell_count(), 55);
    }

    #[test]
    fn same_seed_same_puzzles() {
        let mut a = Generator::with_seed(EngineConfig::default(), 11);
        let mut b = Generator::with_seed(EngineConfig::default(), 11);
        for _ in 0..5 {
            let pa = a.generate(6, Difficulty::Hard);
            let pb = b.generate(6, Difficulty::Hard);
            assert_eq!(pa.waypoints(), pb.waypoints());
            assert_eq!(pa.obstacles(), pb.obstacles());
        }
    }

    #[test]
    fn identifiers_are_unique() {
        let mut g = Generator::with_seed(EngineConfig::default(), 1);
        let ids: BTreeSet<String> = (0..20)
            .map(|_| g.generate(3, Difficulty::Easy).id().to_string())
            .collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn exhausted_draws_degrade_gracefully() {
        let config = EngineConfig {
            max_generation_attempts: 0,
            ..EngineConfig::default()
        };
        let mut g = Generator::with_seed(config, 5);
        let p = g.generate(8, Difficulty::Expert);
        assert_eq!(p.waypoints().len(), 1);
        assert!(p.obstacles().is_empty());
    }

    #[test]
    fn no_waypoints_when_none_allowed() {
        let config = EngineConfig {
            max_numbered_cells: 0,
            ..EngineConfig::default()
        };
        let mut g = Generator::with_seed(config.clone(), 13);
        for difficulty in Difficulty::ALL {
            let p = g.generate(6, difficulty);
            assert!(p.waypoints().is_empty());
            assert!(p.ordered_waypoints().is_empty());
            assert!(p.obstacles().len() <= config.obstacle_budget(6, difficulty));
        }
    }

    #[test]
    fn verified_puzzle_comes_with_a_solution() {
        let config = EngineConfig {
            max_verify_attempts: 200,
            ..EngineConfig::default()
        };
        let mut g = Generator::with_seed(config, 2025);
        let (puzzle, path) = g
            .generate_verified(4, Difficulty::Medium)
            .expect("no solvable 4x4 medium puzzle");
        assert_eq!(path.len(), puzzle.available_cell_count());
        assert!(validator::is_valid(&path, &puzzle));
    }
}
