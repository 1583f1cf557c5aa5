/*
generator.rs

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

//! Grid model and puzzle generation.
//!
//! A [`grid::Puzzle`] object describes the board: its size, the numbered waypoints, and the
//! obstacles. It never changes once created.
//!
//! Puzzles are created either from data, with [`grid::Puzzle::new`] (or by deserializing a
//! [`grid::PuzzleData`] JSON document), or randomly, with a
//! [`random_puzzle::Generator`] object and its [`random_puzzle::Generator::generate`] method.
//!
//! Random puzzles are not guaranteed to have a solution.
//! Use [`random_puzzle::Generator::generate_verified`] to get a puzzle together with a solution
//! found by the [`solver::Solver`].
//! The solver works on [`path::Path`] objects, which the play session also uses.

pub mod grid;
pub mod path;
pub mod random_puzzle;
pub mod solver;
