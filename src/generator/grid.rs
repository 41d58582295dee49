/*
grid.rs

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

//! Rectangular grid of cells and the walls between them.
//!
//! Cells are indexed `[x][y]` with `0 <= x < width` and `0 <= y < height`.
//! A wall between two adjacent cells is stored in both cells. The `*_between` methods of
//! [`Grid`] always update both copies together, so that moving from a cell to its neighbor is
//! possible exactly when moving back is possible.

use disjoint::DisjointSet;
use log::debug;
use serde::{Deserialize, Serialize};

use super::cell_walls::CellWalls;
use super::direction::Direction;
use crate::error::MazeError;

/// Grid of [`CellWalls`].
///
/// The grid is created fully walled. The carver opens passages in place, and the solver works on
/// its own clone.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Cell walls, one vector per column.
    cells: Vec<Vec<CellWalls>>,
}

impl Grid {
    /// Create a fully walled grid.
    ///
    /// # Errors
    ///
    /// Return [`MazeError::InvalidDimensions`] if `width` or `height` is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![vec![CellWalls::new(); height]; width],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Whether the signed coordinates designate a cell of the grid.
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Whether the cell is in the grid.
    pub fn contains(&self, cell: (usize, usize)) -> bool {
        cell.0 < self.width && cell.1 < self.height
    }

    /// Return the walls of the given cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is out of bounds. Callers check [`Grid::contains`] first.
    pub fn cell(&self, cell: (usize, usize)) -> &CellWalls {
        &self.cells[cell.0][cell.1]
    }

    /// Return the neighbor of the cell in the given direction, or None at the grid edge.
    pub fn neighbor(&self, cell: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.delta();
        let x = cell.0.checked_add_signed(dx)?;
        let y = cell.1.checked_add_signed(dy)?;
        if self.contains((x, y)) {
            Some((x, y))
        } else {
            None
        }
    }

    /// Whether the wall of the cell in the given direction is open.
    pub fn is_open(&self, cell: (usize, usize), direction: Direction) -> bool {
        self.cell(cell).is_open(direction)
    }

    /// Open the wall between the cell and its neighbor in the given direction.
    ///
    /// Both sides of the wall are opened. Return the neighbor, or None (and change nothing) when
    /// the direction leads out of the grid.
    pub fn remove_wall_between(
        &mut self,
        cell: (usize, usize),
        direction: Direction,
    ) -> Option<(usize, usize)> {
        let next = self.neighbor(cell, direction)?;
        self.cells[cell.0][cell.1].remove_wall(direction);
        self.cells[next.0][next.1].remove_wall(direction.opposite());
        Some(next)
    }

    /// Close the wall between the cell and its neighbor in the given direction.
    ///
    /// Both sides of the wall are closed. Return the neighbor, or None (and change nothing) when
    /// the direction leads out of the grid.
    pub fn add_wall_between(
        &mut self,
        cell: (usize, usize),
        direction: Direction,
    ) -> Option<(usize, usize)> {
        let next = self.neighbor(cell, direction)?;
        self.cells[cell.0][cell.1].add_wall(direction);
        self.cells[next.0][next.1].add_wall(direction.opposite());
        Some(next)
    }

    /// Return the directions, taken in the given order, in which the cell has an open wall that
    /// leads to another cell of the grid.
    pub fn open_directions(&self, cell: (usize, usize), order: &[Direction]) -> Vec<Direction> {
        order
            .iter()
            .filter(|&&d| self.is_open(cell, d) && self.neighbor(cell, d).is_some())
            .copied()
            .collect()
    }

    /// Iterate over all the cells, column by column.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Verify that the grid has the shape announced by its dimensions.
    ///
    /// A grid built with [`Grid::new`] always does. A grid read from a file might not.
    pub fn check_shape(&self) -> Result<(), MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.cells.len() != self.width || self.cells.iter().any(|c| c.len() != self.height) {
            return Err(MazeError::BrokenInvariant(format!(
                "cell storage does not match the {}x{} dimensions",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Whether every wall agrees with its copy in the neighbor cell, and the outer boundary is
    /// fully closed.
    pub fn is_consistent(&self) -> bool {
        self.coordinates().all(|cell| {
            Direction::all().all(|d| match self.neighbor(cell, d) {
                Some(next) => self.is_open(cell, d) == self.is_open(next, d.opposite()),
                None => !self.is_open(cell, d),
            })
        })
    }

    /// Number of open passages between adjacent cells. Each passage is counted once.
    pub fn open_passages(&self) -> usize {
        self.coordinates()
            .map(|cell| {
                [Direction::Right, Direction::Down]
                    .iter()
                    .filter(|&&d| self.is_open(cell, d) && self.neighbor(cell, d).is_some())
                    .count()
            })
            .sum()
    }

    /// Whether the open passages form a spanning tree of the grid: a perfect maze.
    ///
    /// The walls must be consistent, there must be exactly `width * height - 1` passages, and no
    /// passage may join two cells that are already connected (no loop).
    pub fn is_perfect(&self) -> bool {
        if !self.is_consistent() {
            debug!("Grid walls are not consistent");
            return false;
        }
        let passages: usize = self.open_passages();
        if passages != self.num_cells() - 1 {
            debug!(
                "Grid has {passages} passages instead of {}",
                self.num_cells() - 1
            );
            return false;
        }

        let mut sets = DisjointSet::with_len(self.num_cells());
        let index = |cell: (usize, usize)| cell.0 * self.height + cell.1;
        for cell in self.coordinates() {
            for d in [Direction::Right, Direction::Down] {
                if !self.is_open(cell, d) {
                    continue;
                }
                if let Some(next) = self.neighbor(cell, d) {
                    if !sets.join(index(cell), index(next)) {
                        debug!("Loop detected at the {d} wall of {cell:?}");
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_refuses_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        );
        assert!(Grid::new(3, 0).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn test_in_bounds() {
        let grid = Grid::new(10, 5).unwrap();
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(9, 4));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(!grid.in_bounds(10, 0));
        assert!(!grid.in_bounds(0, 5));
    }

    #[test]
    fn test_neighbor_at_edges() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.neighbor((0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor((0, 0), Direction::Left), None);
        assert_eq!(grid.neighbor((0, 0), Direction::Right), Some((1, 0)));
        assert_eq!(grid.neighbor((0, 0), Direction::Down), Some((0, 1)));
        assert_eq!(grid.neighbor((2, 1), Direction::Right), None);
        assert_eq!(grid.neighbor((2, 1), Direction::Down), None);
    }

    #[test]
    fn test_wall_changes_update_both_sides() {
        let mut grid = Grid::new(3, 3).unwrap();

        assert_eq!(grid.remove_wall_between((1, 1), Direction::Up), Some((1, 0)));
        assert!(grid.is_open((1, 1), Direction::Up));
        assert!(grid.is_open((1, 0), Direction::Down));
        assert!(grid.is_consistent());

        assert_eq!(grid.add_wall_between((1, 0), Direction::Down), Some((1, 1)));
        assert!(!grid.is_open((1, 1), Direction::Up));
        assert!(!grid.is_open((1, 0), Direction::Down));
        assert!(grid.is_consistent());
        assert_eq!(grid, Grid::new(3, 3).unwrap());
    }

    #[test]
    fn test_wall_changes_ignore_the_outer_boundary() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.remove_wall_between((0, 0), Direction::Left), None);
        assert!(!grid.is_open((0, 0), Direction::Left));
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_one_sided_wall_is_inconsistent() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.cells[0][0].remove_wall(Direction::Right);
        assert!(!grid.is_consistent());
        assert!(!grid.is_perfect());
    }

    #[test]
    fn test_open_directions_follow_the_requested_order() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.remove_wall_between((1, 1), Direction::Left);
        grid.remove_wall_between((1, 1), Direction::Right);
        grid.remove_wall_between((1, 1), Direction::Down);

        let order = [
            Direction::Right,
            Direction::Down,
            Direction::Up,
            Direction::Left,
        ];
        assert_eq!(
            grid.open_directions((1, 1), &order),
            vec![Direction::Right, Direction::Down, Direction::Left]
        );
        assert_eq!(
            grid.open_directions((1, 1), &[Direction::Left, Direction::Up]),
            vec![Direction::Left]
        );
    }

    #[test]
    fn test_is_perfect_detects_loops_and_disconnections() {
        // Three passages make a 2x2 tree; a fourth one closes a loop.
        let mut grid = Grid::new(2, 2).unwrap();
        grid.remove_wall_between((0, 0), Direction::Right);
        grid.remove_wall_between((0, 0), Direction::Down);
        grid.remove_wall_between((1, 0), Direction::Down);
        assert_eq!(grid.open_passages(), 3);
        assert!(grid.is_perfect());

        grid.remove_wall_between((0, 1), Direction::Right);
        assert_eq!(grid.open_passages(), 4);
        assert!(!grid.is_perfect());

        // Three passages in a 2x3 grid leave it disconnected even without a loop.
        let mut grid = Grid::new(2, 3).unwrap();
        grid.remove_wall_between((0, 0), Direction::Right);
        grid.remove_wall_between((0, 0), Direction::Down);
        grid.remove_wall_between((1, 2), Direction::Left);
        assert!(!grid.is_perfect());
    }

    #[test]
    fn test_single_cell_grid_is_perfect() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(grid.open_passages(), 0);
        assert!(grid.is_perfect());
    }

    #[test]
    fn test_check_shape() {
        let grid = Grid::new(4, 2).unwrap();
        assert!(grid.check_shape().is_ok());

        let mut broken = grid.clone();
        broken.cells.pop();
        assert!(matches!(
            broken.check_shape(),
            Err(MazeError::BrokenInvariant(_))
        ));
    }
}
