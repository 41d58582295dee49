/*
observer.rs

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

//! Notifications sent by the carver and the solver.
//!
//! A renderer, an animation, or a test implements [`MazeObserver`] to follow each state
//! transition of the algorithms. Observers only receive information: nothing they do can change
//! the outcome of a run.

use serde::{Deserialize, Serialize};

use crate::generator::direction::Direction;

/// Role of a marked cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellRole {
    /// The solver is standing on the cell.
    Visiting,

    /// The algorithm left the cell through a dead end. For the carver this is a transient mark.
    Backtracked,

    /// The cell is part of the solution path.
    Path,

    /// Solver start cell.
    StartGoal,

    /// Solver end cell.
    EndGoal,
}

/// Receiver for the state transitions of the carver and the solver.
///
/// All the methods do nothing by default.
pub trait MazeObserver {
    /// Called once before carving begins.
    fn on_grid_ready(&mut self, _width: usize, _height: usize) {}

    /// Called once per carved passage, for the cell the carver leaves. The matching wall of the
    /// neighbor, in the opposite direction, is removed at the same time.
    fn on_wall_removed(&mut self, _x: usize, _y: usize, _direction: Direction) {}

    /// Called when a cell changes role.
    fn on_cell_marked(&mut self, _x: usize, _y: usize, _role: CellRole) {}
}

impl<T: MazeObserver + ?Sized> MazeObserver for &mut T {
    fn on_grid_ready(&mut self, width: usize, height: usize) {
        (**self).on_grid_ready(width, height);
    }

    fn on_wall_removed(&mut self, x: usize, y: usize, direction: Direction) {
        (**self).on_wall_removed(x, y, direction);
    }

    fn on_cell_marked(&mut self, x: usize, y: usize, role: CellRole) {
        (**self).on_cell_marked(x, y, role);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl MazeObserver for NullObserver {}

/// One recorded notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum MazeEvent {
    GridReady { width: usize, height: usize },
    WallRemoved { x: usize, y: usize, direction: Direction },
    CellMarked { x: usize, y: usize, role: CellRole },
}

/// Observer that keeps every notification, in order.
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    pub events: Vec<MazeEvent>,
}

impl EventRecorder {
    /// Create an empty [`EventRecorder`] object.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Return the cells marked with the given role, in order.
    pub fn cells_with_role(&self, role: CellRole) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MazeEvent::CellMarked { x, y, role: r } if *r == role => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Number of [`MazeEvent::WallRemoved`] notifications.
    pub fn num_walls_removed(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, MazeEvent::WallRemoved { .. }))
            .count()
    }
}

impl MazeObserver for EventRecorder {
    fn on_grid_ready(&mut self, width: usize, height: usize) {
        self.events.push(MazeEvent::GridReady { width, height });
    }

    fn on_wall_removed(&mut self, x: usize, y: usize, direction: Direction) {
        self.events.push(MazeEvent::WallRemoved { x, y, direction });
    }

    fn on_cell_marked(&mut self, x: usize, y: usize, role: CellRole) {
        self.events.push(MazeEvent::CellMarked { x, y, role });
    }
}
