/*
lib.rs

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

//! Waypath puzzle engine.
//!
//! The player draws a single line through every free cell of a square grid, meeting the
//! numbered waypoints in ascending order and avoiding the obstacles.
//!
//! The engine is made of:
//!
//! * The grid model and the puzzle generator, in the [`generator`] module.
//! * The [`session::PathSession`] state machine, which tracks the path that the player draws.
//! * The [`validator`], which decides whether a path solves a puzzle.
//! * The [`scorer`], which builds the [`scorer::CompletionResult`] of a submission.
//!
//! All the tuning constants are in [`config::EngineConfig`].
//!
//! ```
//! use waypath::{Difficulty, EngineConfig, Generator, PathSession, SessionState};
//!
//! let mut generator = Generator::with_seed(EngineConfig::default(), 1);
//! let puzzle = generator.generate(5, Difficulty::Medium);
//! let first = puzzle.ordered_waypoints()[0];
//!
//! let mut session = PathSession::new(puzzle);
//! assert!(session.start(first));
//! assert_eq!(session.state(), SessionState::InProgress);
//! ```

pub mod config;
pub mod generator;
pub mod scorer;
pub mod session;
pub mod validator;

pub use config::EngineConfig;
pub use generator::grid::{CellId, Difficulty, Puzzle, adjacent, available_cell_count};
pub use generator::random_puzzle::Generator;
pub use scorer::{CompletionResult, score};
pub use session::{PathSession, SessionEvent, SessionState};
pub use validator::{Validation, Violation, validate};

/// Generate a random puzzle with the default configuration.
pub fn generate_puzzle(grid_size: usize, difficulty: Difficulty) -> Puzzle {
    Generator::new(EngineConfig::default()).generate(grid_size, difficulty)
}

/// Create a play session for the puzzle with the default configuration.
pub fn create_session(puzzle: Puzzle) -> PathSession {
    PathSession::new(puzzle)
}
