/*
scorer.rs

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

//! Compute the score of a submitted path.
//!
//! The [`CompletionResult`] object is what the engine hands to the outside world (persistence,
//! achievements, pack progression). It is a plain value: the engine does not keep it.
//!
//! Note that the efficiency is `available cells / moves`. For a valid path both numbers are
//! equal, so a valid completion always scores 100% and the star rating mostly depends on the
//! time bonus.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::generator::grid::{CellId, Puzzle};
use crate::validator::{self, Violation};

/// Result of a submission.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub is_valid: bool,

    pub completion_time_seconds: u64,

    /// Number of cells in the submitted path.
    pub move_count: usize,

    /// Between 0 and 100.
    pub efficiency_percent: u32,

    /// Seconds under the optimal completion time.
    pub time_bonus: u64,

    /// Between 0 and 3. Always 0 for an invalid path.
    pub stars: u8,

    pub errors: Vec<Violation>,
}

/// Return `round(available / moves × 100)`, capped at 100.
pub fn efficiency(available: usize, moves: usize) -> u32 {
    if moves == 0 {
        return 0;
    }
    let e: f64 = (available as f64 / moves as f64 * 100.0).round();
    e.min(100.0) as u32
}

/// Return the star rating for a valid path.
pub fn stars(efficiency_percent: u32, time_bonus: u64, config: &EngineConfig) -> u8 {
    if efficiency_percent >= config.three_star_efficiency
        && time_bonus > config.three_star_time_bonus
    {
        3
    } else if efficiency_percent >= config.two_star_efficiency
        && time_bonus > config.two_star_time_bonus
    {
        2
    } else {
        1
    }
}

/// Validate and score the path.
///
/// `elapsed_ms` is the time between the start of the attempt and the submission. A completion
/// time over [`EngineConfig::max_completion_time`] adds [`Violation::TimeExceeded`] to the
/// errors but does not invalidate the path.
pub fn score(
    path: &[CellId],
    puzzle: &Puzzle,
    elapsed_ms: u64,
    config: &EngineConfig,
) -> CompletionResult {
    let validation: validator::Validation = validator::validate(path, puzzle);
    let mut errors: Vec<Violation> = validation.violations;

    let completion_time_seconds: u64 = elapsed_ms / 1000;
    if completion_time_seconds > config.max_completion_time {
        errors.push(Violation::TimeExceeded);
    }

    let move_count: usize = path.len();
    let efficiency_percent: u32 = efficiency(puzzle.available_cell_count(), move_count);
    let time_bonus: u64 = config
        .optimal_completion_time
        .saturating_sub(completion_time_seconds);
    let stars: u8 = if validation.is_valid {
        stars(efficiency_percent, time_bonus, config)
    } else {
        0
    };

    debug!(
        "Score for puzzle {}: valid={} time={completion_time_seconds}s moves={move_count} efficiency={efficiency_percent}% bonus={time_bonus} stars={stars}",
        puzzle.id(),
        validation.is_valid
    );

    CompletionResult {
        is_valid: validation.is_valid,
        completion_time_seconds,
        move_count,
        efficiency_percent,
        time_bonus,
        stars,
        errors,
    }
}
