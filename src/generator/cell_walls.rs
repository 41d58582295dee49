/*
cell_walls.rs

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

//! Wall state of a single maze cell.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// The four walls of a cell. A `true` flag means that the wall is present.
///
/// A wall between two adjacent cells is stored twice, once in each cell. Keeping both copies in
/// sync is the job of [`super::grid::Grid`]; a [`CellWalls`] value only knows about itself.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellWalls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for CellWalls {
    fn default() -> Self {
        Self::new()
    }
}

impl CellWalls {
    /// Create a fully walled cell.
    pub fn new() -> Self {
        Self {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }

    /// Return a mutable reference to the flag of the wall in the given direction.
    fn wall_mut(&mut self, direction: Direction) -> &mut bool {
        match direction {
            Direction::Up => &mut self.top,
            Direction::Down => &mut self.bottom,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Open the wall in the given direction.
    pub fn remove_wall(&mut self, direction: Direction) {
        *self.wall_mut(direction) = false;
    }

    /// Close the wall in the given direction. This is the inverse of [`CellWalls::remove_wall`].
    pub fn add_wall(&mut self, direction: Direction) {
        *self.wall_mut(direction) = true;
    }

    /// Whether the wall in the given direction is open.
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => !self.top,
            Direction::Down => !self.bottom,
            Direction::Left => !self.left,
            Direction::Right => !self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_fully_walled() {
        let cell = CellWalls::new();
        for d in Direction::all() {
            assert!(!cell.is_open(d), "the {d} wall of a new cell should be closed");
        }
    }

    #[test]
    fn test_remove_then_add_wall() {
        let mut cell = CellWalls::new();
        cell.remove_wall(Direction::Left);
        assert!(cell.is_open(Direction::Left));
        assert!(!cell.left);
        assert!(!cell.is_open(Direction::Right));

        // Removing twice is harmless.
        cell.remove_wall(Direction::Left);
        assert!(cell.is_open(Direction::Left));

        cell.add_wall(Direction::Left);
        assert_eq!(cell, CellWalls::new());
    }

    #[test]
    fn test_copies_do_not_alias() {
        let mut original = CellWalls::new();
        original.remove_wall(Direction::Down);

        let mut copy = original;
        copy.add_wall(Direction::Down);

        assert!(original.is_open(Direction::Down));
        assert!(!copy.is_open(Direction::Down));
    }
}
