/*
path.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazewalk.

Mazewalk is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazewalk is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazewalk. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Path between two cells of the maze.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::direction::Direction;
use super::grid::Grid;

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<(usize, usize)>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    visited: HashSet<(usize, usize)>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(num_cells: usize) -> Self {
        Self {
            path: Vec::with_capacity(num_cells),
            visited: HashSet::with_capacity(num_cells),
        }
    }

    /// Create a [`Path`] object from a list of cells.
    pub fn from_cells(cells: &[(usize, usize)]) -> Self {
        Self {
            path: cells.to_vec(),
            visited: cells.iter().copied().collect(),
        }
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: (usize, usize)) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no cell.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    ///
    /// The lookup table is not serialized, so a deserialized path falls back to a scan.
    pub fn contains(&self, cell: (usize, usize)) -> bool {
        if self.visited.is_empty() {
            self.path.contains(&cell)
        } else {
            self.visited.contains(&cell)
        }
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<(usize, usize)> {
        &self.path
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<(usize, usize)> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<(usize, usize)> {
        self.path.last().copied()
    }

    /// Return the moves that walk the path, one per pair of consecutive cells.
    ///
    /// Return None if two consecutive cells are not adjacent.
    pub fn directions(&self) -> Option<Vec<Direction>> {
        self.path
            .windows(2)
            .map(|w| Direction::between(w[0], w[1]))
            .collect()
    }

    /// Whether the path is a valid walk through the maze from `start` to `end`.
    ///
    /// The path must start and end at the given cells, every move must go through a passage that
    /// is open in `maze`, and no cell may appear twice.
    pub fn is_valid_in(&self, maze: &Grid, start: (usize, usize), end: (usize, usize)) -> bool {
        if self.get_first() != Some(start) || self.get_last() != Some(end) {
            return false;
        }
        if self.path.iter().any(|c| !maze.contains(*c)) {
            return false;
        }
        let unique: HashSet<&(usize, usize)> = self.path.iter().collect();
        if unique.len() != self.path.len() {
            return false;
        }
        match self.directions() {
            Some(moves) => self
                .path
                .iter()
                .zip(moves)
                .all(|(cell, d)| maze.is_open(*cell, d)),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Grid {
        // (0,0) - (1,0) - (2,0)
        let mut grid = Grid::new(3, 2).unwrap();
        grid.remove_wall_between((0, 0), Direction::Right);
        grid.remove_wall_between((1, 0), Direction::Right);
        grid
    }

    #[test]
    fn test_push_and_lookup() {
        let mut path = Path::new(4);
        assert!(path.is_empty());
        assert_eq!(path.get_first(), None);

        path.push((0, 0));
        path.push((1, 0));
        assert_eq!(path.len(), 2);
        assert!(path.contains((1, 0)));
        assert!(!path.contains((2, 0)));
        assert_eq!(path.get_first(), Some((0, 0)));
        assert_eq!(path.get_last(), Some((1, 0)));
    }

    #[test]
    fn test_directions() {
        let path = Path::from_cells(&[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(
            path.directions(),
            Some(vec![Direction::Right, Direction::Down])
        );

        let broken = Path::from_cells(&[(0, 0), (2, 0)]);
        assert_eq!(broken.directions(), None);
    }

    #[test]
    fn test_valid_path_through_open_passages() {
        let maze = corridor();
        let path = Path::from_cells(&[(0, 0), (1, 0), (2, 0)]);
        assert!(path.is_valid_in(&maze, (0, 0), (2, 0)));
        assert!(!path.is_valid_in(&maze, (0, 0), (1, 0)));
    }

    #[test]
    fn test_path_through_a_wall_is_invalid() {
        let maze = corridor();
        let path = Path::from_cells(&[(0, 0), (0, 1)]);
        assert!(!path.is_valid_in(&maze, (0, 0), (0, 1)));
    }

    #[test]
    fn test_path_with_repeated_cell_is_invalid() {
        let maze = corridor();
        let path = Path::from_cells(&[(0, 0), (1, 0), (0, 0), (1, 0), (2, 0)]);
        assert!(!path.is_valid_in(&maze, (0, 0), (2, 0)));
    }

    #[test]
    fn test_single_cell_path() {
        let maze = corridor();
        let path = Path::from_cells(&[(1, 1)]);
        assert!(path.is_valid_in(&maze, (1, 1), (1, 1)));
        assert_eq!(path.directions(), Some(Vec::new()));
    }

    #[test]
    fn test_equality_ignores_lookup_table() {
        let mut a = Path::new(2);
        a.push((0, 0));
        let json = serde_json::to_string(&a).unwrap();
        let b: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(a, b);
        assert!(b.contains((0, 0)));
    }
}
