/*
validator.rs

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

//! Decide whether a path solves a puzzle.
//!
//! [`validate`] does not trust the way the path was built: it accepts any list of cells, such as
//! a replay or a resubmission. All the rules are evaluated, so that the returned [`Validation`]
//! object lists every violation and not only the first one.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::generator::grid::{CellId, Puzzle};

/// Rule violations.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// The path goes through an obstacle.
    ObstacleHit,

    /// Two consecutive cells do not share an edge, or a cell is outside the grid.
    InvalidPath,

    /// Waypoints are not visited in ascending order.
    WrongOrder,

    /// The path does not cover all the available cells, or misses a waypoint.
    IncompletePath,

    /// The player took longer than the maximum completion time. Advisory only.
    TimeExceeded,
}

impl Violation {
    /// Whether the violation makes the path invalid.
    pub fn is_blocking(&self) -> bool {
        *self != Violation::TimeExceeded
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Violation::ObstacleHit => write!(f, "obstacle hit"),
            Violation::InvalidPath => write!(f, "invalid path"),
            Violation::WrongOrder => write!(f, "wrong order"),
            Violation::IncompletePath => write!(f, "incomplete path"),
            Violation::TimeExceeded => write!(f, "time exceeded"),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,

    /// Violations in rule order, without duplicates.
    pub violations: Vec<Violation>,
}

impl Validation {
    fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            is_valid: !violations.iter().any(Violation::is_blocking),
            violations,
        }
    }
}

/// Record a violation once.
fn report(violations: &mut Vec<Violation>, violation: Violation) {
    if !violations.contains(&violation) {
        violations.push(violation);
    }
}

/// Check the path against the puzzle rules.
///
/// The rules are, in order:
///
/// 1. The path has exactly [`Puzzle::available_cell_count`] cells and no cell is visited twice.
/// 2. The path never enters an obstacle.
/// 3. Consecutive cells share an edge, and all the cells are inside the grid.
/// 4. Waypoints are met in ascending order.
/// 5. Every waypoint is visited.
pub fn validate(path: &[CellId], puzzle: &Puzzle) -> Validation {
    let mut violations: Vec<Violation> = Vec::new();

    // Coverage
    let distinct: HashSet<&CellId> = path.iter().collect();
    if path.len() != puzzle.available_cell_count() || distinct.len() != path.len() {
        report(&mut violations, Violation::IncompletePath);
    }

    // Obstacles
    if path.iter().any(|c| puzzle.is_obstacle(*c)) {
        report(&mut violations, Violation::ObstacleHit);
    }

    // Continuity
    if path.iter().any(|c| !puzzle.contains(*c))
        || path.windows(2).any(|w| !w[0].is_adjacent(&w[1]))
    {
        report(&mut violations, Violation::InvalidPath);
    }

    // Waypoint order: each waypoint met must be the next one expected
    let ordered: &[CellId] = puzzle.ordered_waypoints();
    let mut consumed: usize = 0;
    let mut seen: HashSet<CellId> = HashSet::with_capacity(ordered.len());
    for cell in path {
        if puzzle.waypoint_number(*cell).is_none() {
            continue;
        }
        seen.insert(*cell);
        if ordered.get(consumed) == Some(cell) {
            consumed += 1;
        } else {
            debug!(
                "Waypoint {cell} met while expecting {:?}",
                ordered.get(consumed)
            );
            report(&mut violations, Violation::WrongOrder);
        }
    }

    // Missed waypoints
    if seen.len() != ordered.len() {
        report(&mut violations, Violation::IncompletePath);
    }

    Validation::from_violations(violations)
}

/// Whether the path solves the puzzle.
pub fn is_valid(path: &[CellId], puzzle: &Puzzle) -> bool {
    validate(path, puzzle).is_valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::{Difficulty, parse_path};
    use std::collections::{BTreeMap, BTreeSet};

    fn diagonal_puzzle(obstacles: &[CellId]) -> Puzzle {
        Puzzle::new(
            "diag",
            3,
            Difficulty::Easy,
            BTreeMap::from([
                (CellId::new(0, 0), 1),
                (CellId::new(1, 1), 2),
                (CellId::new(2, 2), 3),
            ]),
            obstacles.iter().copied().collect::<BTreeSet<CellId>>(),
        )
        .unwrap()
    }

    fn cells(s: &str) -> Vec<CellId> {
        parse_path(s).unwrap()
    }

    #[test]
    fn snake_path_is_valid() {
        let p = diagonal_puzzle(&[]);
        let v = validate(&cells("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2"), &p);
        assert!(v.is_valid);
        assert!(v.violations.is_empty());
    }

    #[test]
    fn non_adjacent_jump_is_invalid_path() {
        let p = diagonal_puzzle(&[]);
        // 1-2 and 1-0 swapped: same cells, same waypoint order, broken continuity
        let v = validate(&cells("0-0,0-1,0-2,1-0,1-1,1-2,2-0,2-1,2-2"), &p);
        assert!(!v.is_valid);
        assert_eq!(v.violations, vec![Violation::InvalidPath]);
    }

    #[test]
    fn waypoint_two_before_one_is_wrong_order() {
        let p = Puzzle::new(
            "order",
            3,
            Difficulty::Easy,
            BTreeMap::from([(CellId::new(0, 0), 2), (CellId::new(2, 2), 1)]),
            BTreeSet::new(),
        )
        .unwrap();
        let v = validate(&cells("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2"), &p);
        assert_eq!(v.violations, vec![Violation::WrongOrder]);

        let reversed: Vec<CellId> = cells("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2")
            .into_iter()
            .rev()
            .collect();
        assert!(is_valid(&reversed, &p));
    }

    #[test]
    fn stepping_on_obstacle_is_reported() {
        let p = diagonal_puzzle(&[CellId::new(2, 0)]);
        // Eight cells are available, the path has eight cells but one of them is the obstacle
        let v = validate(&cells("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1"), &p);
        assert!(v.violations.contains(&Violation::ObstacleHit));
        assert!(!v.is_valid);
    }

    #[test]
    fn short_path_is_incomplete() {
        let p = diagonal_puzzle(&[]);
        let v = validate(&cells("0-0,0-1,1-1,1-2,2-2"), &p);
        assert_eq!(v.violations, vec![Violation::IncompletePath]);
    }

    #[test]
    fn repeated_cell_is_incomplete() {
        let p = diagonal_puzzle(&[CellId::new(0, 2)]);
        let v = validate(&cells("0-0,0-1,1-1,0-1,1-1,1-2,2-2,2-1"), &p);
        assert!(v.violations.contains(&Violation::IncompletePath));
    }

    #[test]
    fn out_of_grid_cell_is_invalid_path() {
        let p = diagonal_puzzle(&[]);
        let v = validate(&cells("0-0,0-1,0-2,0-3,1-1,1-0,2-0,2-1,2-2"), &p);
        assert!(v.violations.contains(&Violation::InvalidPath));
    }

    #[test]
    fn all_violations_are_reported() {
        let p = diagonal_puzzle(&[CellId::new(0, 1)]);
        let v = validate(&cells("1-1,0-1,2-2"), &p);
        assert_eq!(
            v.violations,
            vec![
                Violation::IncompletePath,
                Violation::ObstacleHit,
                Violation::InvalidPath,
                Violation::WrongOrder,
            ]
        );
    }

    #[test]
    fn codes() {
        assert_eq!(Violation::WrongOrder.to_string(), "wrong order");
        assert_eq!(
            serde_json::to_string(&Violation::ObstacleHit).unwrap(),
            "\"obstacle_hit\""
        );
        assert!(!Violation::TimeExceeded.is_blocking());
    }
}
