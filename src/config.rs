/*
config.rs

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

//! Engine configuration.
//!
//! All the tuning constants of the engine are grouped in the [`EngineConfig`] object. The
//! default values are the reference values. A JSON file can override any subset of them:
//!
//! ```json
//! {
//!     "max_grid_size": 10,
//!     "obstacle_multipliers": { "easy": 0.1, "medium": 0.3, "hard": 0.6, "expert": 1.0 }
//! }
//! ```

use log::debug;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::generator::grid::{Difficulty, MAX_PUZZLE_GRID_SIZE};

/// Obstacle multiplier for each difficulty level.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ObstacleMultipliers {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub expert: f64,
}

impl Default for ObstacleMultipliers {
    fn default() -> Self {
        Self {
            easy: 0.0,
            medium: 0.3,
            hard: 0.6,
            expert: 1.0,
        }
    }
}

impl ObstacleMultipliers {
    /// Return the multiplier for the given difficulty level.
    pub fn get(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }
}

/// Engine constants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Smallest grid that the generator builds.
    pub min_grid_size: usize,

    /// Largest grid that the generator builds.
    pub max_grid_size: usize,

    /// Upper bound for the number of waypoints in a puzzle.
    pub max_numbered_cells: usize,

    /// Fraction of the cells that can become obstacles at the hardest level.
    pub max_obstacle_fraction: f64,

    /// Scaling of the obstacle budget per difficulty level.
    pub obstacle_multipliers: ObstacleMultipliers,

    /// Number of random draws for placing one waypoint or one obstacle.
    pub max_generation_attempts: usize,

    /// Completion time, in seconds, under which the player earns a time bonus.
    pub optimal_completion_time: u64,

    /// Completion time, in seconds, over which a [`crate::validator::Violation::TimeExceeded`]
    /// is reported.
    pub max_completion_time: u64,

    pub three_star_efficiency: u32,
    pub three_star_time_bonus: u64,
    pub two_star_efficiency: u32,
    pub two_star_time_bonus: u64,

    /// Time budget for one solver run, in milliseconds.
    pub solver_max_time_ms: u64,

    /// Number of puzzles that [`crate::generator::random_puzzle::Generator::generate_verified`]
    /// tries before giving up.
    pub max_verify_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_grid_size: 3,
            max_grid_size: 8,
            max_numbered_cells: 6,
            max_obstacle_fraction: 0.15,
            obstacle_multipliers: ObstacleMultipliers::default(),
            max_generation_attempts: 50,
            optimal_completion_time: 300,
            max_completion_time: 3600,
            three_star_efficiency: 95,
            three_star_time_bonus: 180,
            two_star_efficiency: 85,
            two_star_time_bonus: 60,
            solver_max_time_ms: 2000,
            max_verify_attempts: 20,
        }
    }
}

impl EngineConfig {
    /// Load the configuration from a JSON file.
    ///
    /// Keys that are not in the file keep their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        debug!("Loading engine configuration from {:?}", path.as_ref());
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Return the obstacle budget for a grid of the given size and difficulty.
    ///
    /// The budget is `floor(N² × max_obstacle_fraction) × multiplier`, rounded down.
    pub fn obstacle_budget(&self, grid_size: usize, difficulty: Difficulty) -> usize {
        let base: f64 = ((grid_size * grid_size) as f64 * self.max_obstacle_fraction).floor();
        (base * self.obstacle_multipliers.get(difficulty)).floor() as usize
    }

    /// Clamp the grid size to the supported range.
    ///
    /// The maximum wins when the configuration has `min_grid_size > max_grid_size`. The result
    /// is always between 1 and [`MAX_PUZZLE_GRID_SIZE`].
    pub fn clamp_grid_size(&self, grid_size: usize) -> usize {
        grid_size
            .max(self.min_grid_size)
            .min(self.max_grid_size)
            .clamp(1, MAX_PUZZLE_GRID_SIZE)
    }
}
