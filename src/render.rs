/*
render.rs

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

//! Draw the maze as text.
//!
//! [`TextRenderer`] is a [`MazeObserver`]: it builds its own picture of the maze from the
//! notifications of the carver and the solver, and can redraw it in the terminal after each one.

use log::debug;
use std::collections::HashMap;
use std::io::{Write, stdout};

use crate::generator::direction::Direction;
use crate::generator::grid::Grid;
use crate::generator::path::Path;
use crate::observer::{CellRole, MazeObserver};

/// ANSI sequence that clears the terminal and moves the cursor to the top-left corner.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Text renderer.
#[derive(Debug, Default)]
pub struct TextRenderer {
    /// Picture of the maze, created when the grid is announced.
    grid: Option<Grid>,

    /// Role of the marked cells. Goal cells are kept apart so that no other mark hides them.
    marks: HashMap<(usize, usize), CellRole>,

    start_goal: Option<(usize, usize)>,
    end_goal: Option<(usize, usize)>,

    /// Whether to redraw the maze after each notification.
    animate: bool,

    /// Number of frames drawn.
    pub frames: usize,
}

impl TextRenderer {
    /// Create a [`TextRenderer`] object that waits for a grid to be announced.
    pub fn new(animate: bool) -> Self {
        Self {
            animate,
            ..Default::default()
        }
    }

    /// Create a [`TextRenderer`] object for an already carved maze.
    pub fn from_maze(maze: &Grid, animate: bool) -> Self {
        Self {
            grid: Some(maze.clone()),
            animate,
            ..Default::default()
        }
    }

    /// Mark all the cells of a path.
    pub fn mark_path(&mut self, path: &Path) {
        for cell in path.get() {
            self.marks.insert(*cell, CellRole::Path);
        }
    }

    /// Return the character drawn in the middle of a cell.
    fn glyph(&self, cell: (usize, usize)) -> char {
        if self.start_goal == Some(cell) {
            return 'S';
        }
        if self.end_goal == Some(cell) {
            return 'E';
        }
        match self.marks.get(&cell) {
            Some(CellRole::Visiting) => '.',
            Some(CellRole::Backtracked) => 'x',
            Some(CellRole::Path) => '*',
            Some(CellRole::StartGoal) => 'S',
            Some(CellRole::EndGoal) => 'E',
            None => ' ',
        }
    }

    /// Return the maze as text, one line per wall row and one line per cell row.
    ///
    /// Return an empty string if no grid has been announced yet.
    pub fn render(&self) -> String {
        let grid: &Grid = match &self.grid {
            Some(g) => g,
            None => return String::new(),
        };
        let mut s: String = String::new();

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                s.push('+');
                s.push_str(if grid.is_open((x, y), Direction::Up) {
                    "   "
                } else {
                    "---"
                });
            }
            s.push_str("+\n");

            for x in 0..grid.width() {
                s.push(if grid.is_open((x, y), Direction::Left) {
                    ' '
                } else {
                    '|'
                });
                s.push(' ');
                s.push(self.glyph((x, y)));
                s.push(' ');
            }
            let last: (usize, usize) = (grid.width() - 1, y);
            s.push(if grid.is_open(last, Direction::Right) {
                ' '
            } else {
                '|'
            });
            s.push('\n');
        }

        for x in 0..grid.width() {
            s.push('+');
            s.push_str(if grid.is_open((x, grid.height() - 1), Direction::Down) {
                "   "
            } else {
                "---"
            });
        }
        s.push_str("+\n");
        s
    }

    /// Redraw the maze in the terminal when animating.
    fn draw_frame(&mut self) {
        if !self.animate {
            return;
        }
        let mut out = stdout().lock();
        // Drawing errors (closed terminal) must not interrupt the algorithms
        let _ = write!(out, "{CLEAR_SCREEN}{}", self.render());
        let _ = out.flush();
        self.frames += 1;
    }
}

impl MazeObserver for TextRenderer {
    fn on_grid_ready(&mut self, width: usize, height: usize) {
        match Grid::new(width, height) {
            Ok(g) => self.grid = Some(g),
            Err(e) => debug!("Cannot draw the grid: {e}"),
        }
        self.marks.clear();
        self.draw_frame();
    }

    fn on_wall_removed(&mut self, x: usize, y: usize, direction: Direction) {
        if let Some(g) = &mut self.grid {
            g.remove_wall_between((x, y), direction);
        }
        self.draw_frame();
    }

    fn on_cell_marked(&mut self, x: usize, y: usize, role: CellRole) {
        match role {
            CellRole::StartGoal => self.start_goal = Some((x, y)),
            CellRole::EndGoal => self.end_goal = Some((x, y)),
            CellRole::Backtracked => {
                // Flash the dead end, then erase it
                self.marks.insert((x, y), role);
                self.draw_frame();
                self.marks.remove(&(x, y));
            }
            CellRole::Visiting | CellRole::Path => {
                self.marks.insert((x, y), role);
            }
        }
        self.draw_frame();
    }
}
