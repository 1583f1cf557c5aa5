/*
path.rs

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

//! Path drawn over the grid.

use std::collections::HashSet;

use super::grid::CellId;

/// Path object.
#[derive(Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<CellId>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<CellId>,
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(num_cells: usize) -> Self {
        Self {
            path: Vec::with_capacity(num_cells),
            visited: HashSet::with_capacity(num_cells),
        }
    }

    /// Remove all the cells from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.visited.clear();
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: CellId) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Remove the last cell from the path and return it.
    pub fn pop(&mut self) -> Option<CellId> {
        let cell: CellId = self.path.pop()?;
        self.visited.remove(&cell);
        Some(cell)
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: CellId) -> bool {
        self.visited.contains(&cell)
    }

    /// Return a reference to the path cells.
    pub fn get(&self) -> &[CellId] {
        &self.path
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<CellId> {
        self.path.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_keeps_lookup_in_sync() {
        let mut p = Path::new(4);
        p.push(CellId::new(0, 0));
        p.push(CellId::new(0, 1));
        assert!(p.contains(CellId::new(0, 1)));
        assert_eq!(p.pop(), Some(CellId::new(0, 1)));
        assert!(!p.contains(CellId::new(0, 1)));
        assert_eq!(p.get_last(), Some(CellId::new(0, 0)));
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.pop(), None);
    }
}
