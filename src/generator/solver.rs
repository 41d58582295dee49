/*
solver.rs

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

//! Find the path between two cells of a perfect maze by sealing walls.
//!
//! The solver walks the maze depth first with an explicit stack of cells and no visited set.
//! Each time it goes through a passage, it closes the wall behind itself on both sides. A cell it
//! has explored can then no longer be reached through an open wall, which is all the visited set
//! would have told it. This is only correct because the maze is a tree: the path from the start
//! to the end never uses the same passage twice, so sealing a passage right after crossing it can
//! never cut the solution.
//!
//! The walls are sealed in a private copy of the maze. The [`Grid`] given to [`Solver::new`] is
//! never modified, and solving the same maze again gives the same path.

use log::{debug, error, trace, warn};
use std::fmt;
use std::time::Instant;

use super::direction::{Direction, SOLVER_SCAN_ORDER};
use super::grid::Grid;
use super::path::Path;
use crate::error::MazeError;
use crate::observer::{CellRole, MazeObserver};
use crate::pacing::{Pacer, RunOutcome, StopSignal};

/// Which solver coordinate was replaced.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Warning returned when a requested start or end cell is outside the maze.
///
/// Each out-of-bounds coordinate is replaced by the matching coordinate of the default cell:
/// `(0, 0)` for the start, the bottom-right cell for the end.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClampWarning {
    pub endpoint: Endpoint,
    pub requested: (i64, i64),
    pub effective: (usize, usize),
}

impl fmt::Display for ClampWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} cell {:?} is outside of the maze, using {:?} instead",
            self.endpoint, self.requested, self.effective
        )
    }
}

/// Result of a single solving step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolveStep {
    /// The solver went through the passage toward `direction` and sealed it behind itself.
    Advanced {
        from: (usize, usize),
        direction: Direction,
        to: (usize, usize),
    },

    /// The cell had no open wall left; the solver went back to the previous cell.
    Backtracked { cell: (usize, usize) },

    /// The solver is on the end cell.
    Arrived,
}

/// [`Solver`] object.
pub struct Solver {
    /// Private copy of the maze where explored passages get sealed.
    walls: Grid,

    /// Cells from the start cell to the cell before the current one.
    stack: Vec<(usize, usize)>,

    /// Cell the solver is standing on.
    current: (usize, usize),

    /// Effective start cell.
    pub start: (usize, usize),

    /// Effective end cell.
    pub end: (usize, usize),

    /// Number of steps taken so far, the final arrival excluded.
    pub iteration: usize,

    /// Number of backtracking steps.
    pub backtracks: usize,

    /// Duration in seconds of the last [`Solver::run`].
    pub duration: f32,

    /// Whether the goal cells have been announced to the observer.
    announced: bool,

    /// Whether the path has been announced to the observer.
    arrived: bool,
}

/// Return `requested` if it is in the grid. Otherwise replace each out-of-bounds coordinate with
/// the coordinate of `default`.
///
/// The replacement is the default cell, not the nearest cell: on a 10-wide grid with the default
/// `(0, 0)`, a requested start of `(12, 3)` becomes `(0, 3)`, not `(9, 3)`.
fn clamp(grid: &Grid, requested: (i64, i64), default: (usize, usize)) -> (usize, usize) {
    let x: usize = if grid.in_bounds(requested.0, 0) {
        requested.0 as usize
    } else {
        default.0
    };
    let y: usize = if grid.in_bounds(0, requested.1) {
        requested.1 as usize
    } else {
        default.1
    };
    (x, y)
}

impl Solver {
    /// Create the object for solving `maze` from `start` to `end`.
    ///
    /// The maze is copied. Out-of-bounds coordinates are replaced (see [`ClampWarning`]); the
    /// returned list holds one warning per replaced cell, and each warning is also logged.
    pub fn new(maze: &Grid, start: (i64, i64), end: (i64, i64)) -> (Self, Vec<ClampWarning>) {
        let mut warnings: Vec<ClampWarning> = Vec::new();

        let effective_start: (usize, usize) = clamp(maze, start, (0, 0));
        if !maze.in_bounds(start.0, start.1) {
            warnings.push(ClampWarning {
                endpoint: Endpoint::Start,
                requested: start,
                effective: effective_start,
            });
        }

        let effective_end: (usize, usize) =
            clamp(maze, end, (maze.width() - 1, maze.height() - 1));
        if !maze.in_bounds(end.0, end.1) {
            warnings.push(ClampWarning {
                endpoint: Endpoint::End,
                requested: end,
                effective: effective_end,
            });
        }

        for w in &warnings {
            warn!("{w}");
        }

        let solver = Self {
            walls: maze.clone(),
            stack: Vec::with_capacity(maze.num_cells()),
            current: effective_start,
            start: effective_start,
            end: effective_end,
            iteration: 0,
            backtracks: 0,
            duration: 0.0,
            announced: false,
            arrived: false,
        };
        (solver, warnings)
    }

    /// Return the private copy of the maze, with the sealed walls.
    pub fn walls(&self) -> &Grid {
        &self.walls
    }

    /// Return the cell the solver is standing on.
    pub fn current(&self) -> (usize, usize) {
        self.current
    }

    /// Whether the solver reached the end cell.
    pub fn is_arrived(&self) -> bool {
        self.current == self.end
    }

    /// Return the cells from the start cell to the current cell.
    ///
    /// Once the solver has arrived, this is the path from the start to the end.
    pub fn path(&self) -> Path {
        let mut path: Path = Path::new(self.stack.len() + 1);
        for cell in &self.stack {
            path.push(*cell);
        }
        path.push(self.current);
        path
    }

    /// Perform one solving step.
    ///
    /// The first call marks the goal cells. The call that finds the solver on the end cell marks
    /// the path cells.
    ///
    /// # Errors
    ///
    /// Return [`MazeError::BrokenInvariant`] when the solver must backtrack from the start cell,
    /// which means that the end cell cannot be reached and the maze is not a spanning tree.
    pub fn step<O: MazeObserver>(&mut self, observer: &mut O) -> Result<SolveStep, MazeError> {
        if !self.announced {
            observer.on_cell_marked(self.start.0, self.start.1, CellRole::StartGoal);
            observer.on_cell_marked(self.end.0, self.end.1, CellRole::EndGoal);
            self.announced = true;
        }

        if self.is_arrived() {
            if !self.arrived {
                for (x, y) in self.path().get() {
                    observer.on_cell_marked(*x, *y, CellRole::Path);
                }
                self.arrived = true;
            }
            return Ok(SolveStep::Arrived);
        }

        self.iteration += 1;
        let current: (usize, usize) = self.current;
        observer.on_cell_marked(current.0, current.1, CellRole::Visiting);

        let branches: Vec<Direction> = self.walls.open_directions(current, &SOLVER_SCAN_ORDER);
        if let Some(&direction) = branches.first() {
            self.stack.push(current);
            // Seal the passage on both sides
            let next: (usize, usize) = self
                .walls
                .add_wall_between(current, direction)
                .ok_or_else(|| {
                    MazeError::BrokenInvariant(format!(
                        "open wall {direction} of {current:?} leads out of the grid"
                    ))
                })?;
            trace!("Solving {current:?} -> {next:?} ({direction})");
            self.current = next;
            return Ok(SolveStep::Advanced {
                from: current,
                direction,
                to: next,
            });
        }

        trace!("Dead end at {current:?}");
        observer.on_cell_marked(current.0, current.1, CellRole::Backtracked);
        match self.stack.pop() {
            Some(previous) => {
                self.current = previous;
                self.backtracks += 1;
                Ok(SolveStep::Backtracked { cell: current })
            }
            None => {
                error!(
                    "Solver backtracked past the start cell {:?}: {:?} is unreachable",
                    self.start, self.end
                );
                Err(MazeError::BrokenInvariant(format!(
                    "no path from {:?} to {:?}",
                    self.start, self.end
                )))
            }
        }
    }

    /// Solve until the end cell is reached or the stop signal is raised.
    ///
    /// The pacer is consulted between steps only.
    pub fn run<O: MazeObserver>(
        &mut self,
        observer: &mut O,
        pacer: &Pacer,
        stop: &StopSignal,
    ) -> Result<RunOutcome, MazeError> {
        let start: Instant = Instant::now();
        debug!("Solving from {:?} to {:?}", self.start, self.end);

        loop {
            if stop.is_raised() {
                debug!("Solving stopped after {} iterations", self.iteration);
                self.duration = start.elapsed().as_secs_f32();
                return Ok(RunOutcome::Stopped);
            }
            if self.step(observer)? == SolveStep::Arrived {
                break;
            }
            pacer.wait();
        }

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Backtracks = {}  Path length = {}  Duration = {}",
            self.iteration,
            self.backtracks,
            self.stack.len() + 1,
            self.duration
        );
        Ok(RunOutcome::Completed)
    }
}

/// Solve `maze` from `start` to `end` in one go, without pacing.
pub fn solve<O: MazeObserver>(
    maze: &Grid,
    start: (i64, i64),
    end: (i64, i64),
    observer: &mut O,
) -> Result<(Path, Vec<ClampWarning>), MazeError> {
    let (mut solver, warnings) = Solver::new(maze, start, end);
    solver.run(observer, &Pacer::unthrottled(), &StopSignal::new())?;
    Ok((solver.path(), warnings))
}
