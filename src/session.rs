/*
session.rs

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

//! Manage the path that the player is drawing.
//!
//! A [`PathSession`] object tracks one attempt at one puzzle. The player starts the path on a
//! cell, then extends it cell by cell. When the path covers all the available cells, it is
//! validated: the session becomes [`SessionState::Completed`] if the path is valid, and stays
//! [`SessionState::InProgress`] otherwise so that the player can undo.
//!
//! ```text
//!          start            extend (full and valid)
//!  Empty ---------> InProgress ---------------------> Completed
//!    ^                |   ^  |                            |
//!    |   undo (last)  |   |  | extend, undo, redo         |
//!    +----------------+   +--+                            |
//!    +--------------------- clear ------------------------+
//! ```
//!
//! The session is not thread safe: the owner serializes the calls.
//! Observers receive [`SessionEvent`] messages through the channels returned by
//! [`PathSession::subscribe`].

use async_channel::{Receiver, Sender, TrySendError};
use log::{debug, info};
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::generator::grid::{CellId, Puzzle};
use crate::generator::path::Path;
use crate::scorer::{self, CompletionResult};
use crate::validator::{self, Validation, Violation};

/// State of the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No cell in the path.
    Empty,

    /// The player is drawing the path.
    InProgress,

    /// The path is a valid solution.
    Completed,
}

/// Notification sent to the observers after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started(CellId),
    Extended(CellId),
    Undone(CellId),
    Redone(CellId),
    Cleared,

    /// The path is a valid solution.
    Completed,

    /// The path covers all the cells but is not a solution.
    Rejected(Vec<Violation>),
}

/// Play session for a puzzle.
#[derive(Debug)]
pub struct PathSession {
    puzzle: Puzzle,

    config: EngineConfig,

    state: SessionState,

    path: Path,

    /// Cells removed by [`PathSession::undo`], most recent last.
    redo_cells: Vec<CellId>,

    /// Time when the path was started. Used to compute the duration.
    start_time: Instant,

    /// The elapsed time when the player paused the game.
    pause_duration: Option<Duration>,

    /// The elapsed time when the path was completed.
    completion_duration: Option<Duration>,

    observers: Vec<Sender<SessionEvent>>,
}

impl PathSession {
    /// Create a [`PathSession`] object with the default configuration.
    pub fn new(puzzle: Puzzle) -> Self {
        Self::with_config(puzzle, EngineConfig::default())
    }

    /// Create a [`PathSession`] object.
    pub fn with_config(puzzle: Puzzle, config: EngineConfig) -> Self {
        let num_cells: usize = puzzle.available_cell_count();
        Self {
            puzzle,
            config,
            state: SessionState::Empty,
            path: Path::new(num_cells),
            redo_cells: Vec::new(),
            start_time: Instant::now(),
            pause_duration: None,
            completion_duration: None,
            observers: Vec::new(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Return the cells of the path drawn so far.
    pub fn path(&self) -> &[CellId] {
        self.path.get()
    }

    /// Return a channel that receives all the future session events.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = async_channel::unbounded::<SessionEvent>();
        self.observers.push(tx);
        rx
    }

    /// Send the event to all the observers and forget the ones that are gone.
    fn notify(&mut self, event: SessionEvent) {
        self.observers
            .retain(|tx| !matches!(tx.try_send(event.clone()), Err(TrySendError::Closed(_))));
    }

    /// Whether the cell can be part of a path.
    fn is_free(&self, cell: CellId) -> bool {
        self.puzzle.contains(cell) && !self.puzzle.is_obstacle(cell)
    }

    /// Start the path on the given cell.
    ///
    /// Return `false` if the path is not empty or if the cell is an obstacle.
    pub fn start(&mut self, cell: CellId) -> bool {
        if !self.begin(cell) {
            return false;
        }
        self.redo_cells.clear();
        self.notify(SessionEvent::Started(cell));
        self.notify_completion();
        true
    }

    fn begin(&mut self, cell: CellId) -> bool {
        if self.state != SessionState::Empty || !self.is_free(cell) {
            debug!("Cannot start the path on {cell} ({:?})", self.state);
            return false;
        }
        self.path.push(cell);
        self.state = SessionState::InProgress;
        self.start_time = Instant::now();
        self.pause_duration = None;
        self.completion_duration = None;
        true
    }

    /// Add the cell at the end of the path.
    ///
    /// Return `false` if the path is not in progress, or if the cell is an obstacle, is already
    /// in the path, or is not adjacent to the last cell.
    /// When the path covers all the available cells, it is validated.
    pub fn extend(&mut self, cell: CellId) -> bool {
        if !self.append(cell) {
            return false;
        }
        self.redo_cells.clear();
        self.notify(SessionEvent::Extended(cell));
        self.notify_completion();
        true
    }

    fn append(&mut self, cell: CellId) -> bool {
        if self.state != SessionState::InProgress
            || !self.is_free(cell)
            || self.path.contains(cell)
            || !self.path.get_last().is_some_and(|last| last.is_adjacent(&cell))
        {
            debug!("Cannot extend the path to {cell} ({:?})", self.state);
            return false;
        }
        self.path.push(cell);
        true
    }

    /// Validate the path if it covers all the cells, and update the state.
    ///
    /// Return the validation outcome when the path is full.
    fn check_completion(&mut self) -> Option<Validation> {
        if self.path.len() != self.puzzle.available_cell_count() {
            return None;
        }
        let validation: Validation = validator::validate(self.path.get(), &self.puzzle);
        if validation.is_valid {
            self.state = SessionState::Completed;
            self.completion_duration = Some(self.elapsed());
            info!(
                "Puzzle {} completed in {:?}",
                self.puzzle.id(),
                self.completion_duration
            );
        } else {
            debug!("Full path rejected: {:?}", validation.violations);
        }
        Some(validation)
    }

    fn notify_completion(&mut self) {
        if let Some(validation) = self.check_completion() {
            if validation.is_valid {
                self.notify(SessionEvent::Completed);
            } else {
                self.notify(SessionEvent::Rejected(validation.violations));
            }
        }
    }

    /// Remove the last cell of the path.
    ///
    /// Return `false` if the path is empty or completed.
    pub fn undo(&mut self) -> bool {
        if self.state != SessionState::InProgress {
            return false;
        }
        let Some(cell) = self.path.pop() else {
            return false;
        };
        if self.path.is_empty() {
            self.state = SessionState::Empty;
        }
        self.redo_cells.push(cell);
        self.notify(SessionEvent::Undone(cell));
        true
    }

    /// Put back the last cell removed by [`PathSession::undo`].
    ///
    /// Return `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(cell) = self.redo_cells.last().copied() else {
            return false;
        };
        let done: bool = match self.state {
            SessionState::Empty => self.begin(cell),
            _ => self.append(cell),
        };
        if !done {
            return false;
        }
        self.redo_cells.pop();
        self.notify(SessionEvent::Redone(cell));
        self.notify_completion();
        true
    }

    /// Return the number of cells that [`PathSession::redo`] can put back.
    pub fn redo_len(&self) -> usize {
        self.redo_cells.len()
    }

    /// Remove all the cells from the path. Always succeeds, even on a completed path.
    pub fn clear(&mut self) -> bool {
        self.path.clear();
        self.redo_cells.clear();
        self.state = SessionState::Empty;
        self.pause_duration = None;
        self.completion_duration = None;
        self.notify(SessionEvent::Cleared);
        true
    }

    /// Live efficiency estimate, between 0 and 100.
    ///
    /// This is a hint for the display only. See [`scorer::score`] for the real score.
    pub fn current_efficiency(&self) -> u32 {
        let available: usize = self.puzzle.available_cell_count();
        scorer::efficiency(available, self.path.len().max(available))
    }

    /// Return the first waypoint, in sequence order, that is not in the path yet.
    pub fn next_waypoint_hint(&self) -> Option<CellId> {
        self.puzzle
            .ordered_waypoints()
            .iter()
            .find(|c| !self.path.contains(**c))
            .copied()
    }

    /// Pause the clock.
    pub fn pause(&mut self) {
        if self.pause_duration.is_none() {
            // Store the played time so far, so that the pause time can be deduced when the
            // player resumes the game.
            self.pause_duration = Some(self.start_time.elapsed());
        }
    }

    /// Resume the clock.
    pub fn resume(&mut self) {
        // Refresh the game elapsed time by removing the pause time.
        if let Some(d) = self.pause_duration {
            self.start_time += self.start_time.elapsed() - d;
            self.pause_duration = None;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.pause_duration.is_some()
    }

    /// Return the time spent on the path, without the pauses.
    ///
    /// The clock starts with [`PathSession::start`] and stops when the path is completed.
    pub fn elapsed(&self) -> Duration {
        if self.state == SessionState::Empty {
            return Duration::ZERO;
        }
        self.completion_duration
            .or(self.pause_duration)
            .unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Score the current path with the session clock.
    ///
    /// The session does not keep the result.
    pub fn completion_result(&self) -> CompletionResult {
        let elapsed_ms: u64 = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX);
        scorer::score(self.path.get(), &self.puzzle, elapsed_ms, &self.config)
    }
}
