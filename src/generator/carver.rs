/*
carver.rs

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

//! Carve a perfect maze with a randomized depth-first search.
//!
//! The carver starts from a fully walled [`Grid`] and opens one passage per step, always from the
//! current cell to a random unvisited neighbor. When the current cell has no unvisited neighbor,
//! the carver backtracks to the previous cell of its stack. The run ends when the stack is empty,
//! at which point every cell has been visited exactly once and the passages form a spanning tree
//! of the grid.
//!
//! The search uses an explicit stack instead of recursion, so that the run can be paused between
//! two steps (for animations) and so that large grids cannot overflow the call stack.

use log::{debug, error, trace};
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::time::Instant;

use super::direction::Direction;
use super::grid::Grid;
use crate::error::MazeError;
use crate::observer::{CellRole, MazeObserver};
use crate::pacing::{Pacer, RunOutcome, StopSignal};

/// Result of a single carving step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CarveStep {
    /// A passage was opened from `from` toward `direction`, and the carver moved to `to`.
    Carved {
        from: (usize, usize),
        direction: Direction,
        to: (usize, usize),
    },

    /// The cell was a dead end and the carver stepped back.
    Backtracked { cell: (usize, usize) },

    /// The stack is empty: the maze is finished.
    Finished,
}

/// [`Carver`] object.
pub struct Carver<R: Rng> {
    /// Grid being carved.
    grid: Grid,

    /// Cells already part of the tree. Only used during carving.
    visited: Vec<Vec<bool>>,

    /// Number of `true` flags in [`Carver::visited`].
    num_visited: usize,

    /// Cells from the start cell to the current cell. The current cell is on top.
    stack: Vec<(usize, usize)>,

    /// Random source used to pick the next branch.
    rng: R,

    /// Starting cell.
    pub start: (usize, usize),

    /// Number of steps taken so far.
    pub iteration: usize,

    /// Duration in seconds of the last [`Carver::run`].
    pub duration: f32,
}

impl<R: Rng> Carver<R> {
    /// Create the object.
    ///
    /// # Errors
    ///
    /// The start cell must be in the grid. The carver does not correct it: an out-of-bounds
    /// start returns [`MazeError::StartOutOfBounds`].
    pub fn new(grid: Grid, start: (usize, usize), rng: R) -> Result<Self, MazeError> {
        if !grid.contains(start) {
            error!(
                "Carving start {start:?} outside of the {}x{} grid",
                grid.width(),
                grid.height()
            );
            return Err(MazeError::StartOutOfBounds {
                x: start.0,
                y: start.1,
                width: grid.width(),
                height: grid.height(),
            });
        }

        let mut visited: Vec<Vec<bool>> = vec![vec![false; grid.height()]; grid.width()];
        visited[start.0][start.1] = true;
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(grid.num_cells());
        stack.push(start);

        Ok(Self {
            grid,
            visited,
            num_visited: 1,
            stack,
            rng,
            start,
            iteration: 0,
            duration: 0.0,
        })
    }

    /// Return the grid in its current state.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the carver and return the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Return the cell the carver is on, or None once the maze is finished.
    pub fn current(&self) -> Option<(usize, usize)> {
        self.stack.last().copied()
    }

    /// Whether the maze is finished.
    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Return the directions from `cell` that lead to a cell not yet in the tree.
    fn branches(&self, cell: (usize, usize)) -> Vec<Direction> {
        Direction::all()
            .filter(|&d| match self.grid.neighbor(cell, d) {
                Some((x, y)) => !self.visited[x][y],
                None => false,
            })
            .collect()
    }

    /// Perform one carving step.
    ///
    /// The first call also announces the grid to the observer.
    pub fn step<O: MazeObserver>(&mut self, observer: &mut O) -> Result<CarveStep, MazeError> {
        if self.iteration == 0 {
            observer.on_grid_ready(self.grid.width(), self.grid.height());
        }

        let current: (usize, usize) = match self.current() {
            Some(c) => c,
            None => return Ok(CarveStep::Finished),
        };
        self.iteration += 1;

        let branches: Vec<Direction> = self.branches(current);
        match branches.choose(&mut self.rng) {
            Some(&direction) => {
                let next: (usize, usize) = self
                    .grid
                    .remove_wall_between(current, direction)
                    .ok_or_else(|| {
                        MazeError::BrokenInvariant(format!(
                            "branch {direction} of {current:?} leads out of the grid"
                        ))
                    })?;
                trace!("Carving {current:?} -> {next:?} ({direction})");
                observer.on_wall_removed(current.0, current.1, direction);

                self.visited[next.0][next.1] = true;
                self.num_visited += 1;
                self.stack.push(next);
                Ok(CarveStep::Carved {
                    from: current,
                    direction,
                    to: next,
                })
            }
            None => {
                trace!("Dead end at {current:?}");
                self.stack.pop();
                observer.on_cell_marked(current.0, current.1, CellRole::Backtracked);
                Ok(CarveStep::Backtracked { cell: current })
            }
        }
    }

    /// Carve until the maze is finished or the stop signal is raised.
    ///
    /// The pacer is consulted between steps only.
    ///
    /// # Errors
    ///
    /// Return [`MazeError::BrokenInvariant`] if the stack empties before every cell is visited.
    pub fn run<O: MazeObserver>(
        &mut self,
        observer: &mut O,
        pacer: &Pacer,
        stop: &StopSignal,
    ) -> Result<RunOutcome, MazeError> {
        let start: Instant = Instant::now();
        debug!(
            "Carving a {}x{} maze from {:?}",
            self.grid.width(),
            self.grid.height(),
            self.start
        );

        loop {
            if stop.is_raised() {
                debug!("Carving stopped after {} iterations", self.iteration);
                self.duration = start.elapsed().as_secs_f32();
                return Ok(RunOutcome::Stopped);
            }
            if self.step(observer)? == CarveStep::Finished {
                break;
            }
            pacer.wait();
        }

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );

        if self.num_visited != self.grid.num_cells() {
            error!(
                "Carving visited {} cells out of {}",
                self.num_visited,
                self.grid.num_cells()
            );
            return Err(MazeError::BrokenInvariant(format!(
                "carving ended after visiting {} cells out of {}",
                self.num_visited,
                self.grid.num_cells()
            )));
        }
        Ok(RunOutcome::Completed)
    }
}

/// Carve a new `width` x `height` maze from `start` in one go, without pacing.
pub fn generate<R: Rng, O: MazeObserver>(
    width: usize,
    height: usize,
    start: (usize, usize),
    rng: R,
    observer: &mut O,
) -> Result<Grid, MazeError> {
    let mut carver: Carver<R> = Carver::new(Grid::new(width, height)?, start, rng)?;
    carver.run(observer, &Pacer::unthrottled(), &StopSignal::new())?;
    Ok(carver.into_grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{EventRecorder, MazeEvent, NullObserver};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_mazes_are_perfect() {
        for (width, height) in [(1, 1), (1, 7), (7, 1), (2, 2), (5, 9), (20, 20)] {
            for _ in 0..64 {
                let grid = generate(width, height, (0, 0), rand::rng(), &mut NullObserver)
                    .expect("generation should succeed");
                assert_eq!(
                    grid.open_passages(),
                    width * height - 1,
                    "a {width}x{height} maze should have {} passages",
                    width * height - 1
                );
                assert!(grid.is_consistent(), "walls should be paired");
                assert!(grid.is_perfect(), "maze should be a spanning tree");
            }
        }
    }

    #[test]
    fn test_any_start_cell_gives_a_perfect_maze() {
        for x in 0..4 {
            for y in 0..3 {
                let grid = generate(4, 3, (x, y), rand::rng(), &mut NullObserver).unwrap();
                assert!(grid.is_perfect(), "maze carved from ({x}, {y}) should be perfect");
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(3, 3, (0, 0), StdRng::seed_from_u64(7), &mut NullObserver).unwrap();
        let b = generate(3, 3, (0, 0), StdRng::seed_from_u64(7), &mut NullObserver).unwrap();
        assert_eq!(a, b);

        let big_a = generate(30, 20, (4, 4), StdRng::seed_from_u64(99), &mut NullObserver).unwrap();
        let big_b = generate(30, 20, (4, 4), StdRng::seed_from_u64(99), &mut NullObserver).unwrap();
        assert_eq!(big_a, big_b);
    }

    #[test]
    fn test_start_out_of_bounds_is_refused() {
        let grid = Grid::new(3, 3).unwrap();
        let res = Carver::new(grid, (3, 0), rand::rng());
        assert!(matches!(
            res,
            Err(MazeError::StartOutOfBounds { x: 3, y: 0, .. })
        ));
    }

    #[test]
    fn test_walls_stay_paired_after_every_step() {
        let grid = Grid::new(6, 5).unwrap();
        let mut carver = Carver::new(grid, (2, 2), StdRng::seed_from_u64(3)).unwrap();
        loop {
            let step = carver.step(&mut NullObserver).unwrap();
            assert!(carver.grid().is_consistent(), "walls unpaired after {step:?}");
            if step == CarveStep::Finished {
                break;
            }
        }
        assert!(carver.is_finished());
        assert_eq!(carver.current(), None);
    }

    #[test]
    fn test_step_after_finish_is_quiet() {
        let grid = Grid::new(3, 3).unwrap();
        let mut carver = Carver::new(grid, (0, 0), StdRng::seed_from_u64(5)).unwrap();
        while carver.step(&mut NullObserver).unwrap() != CarveStep::Finished {}

        let mut recorder = EventRecorder::new();
        assert_eq!(carver.step(&mut recorder).unwrap(), CarveStep::Finished);
        assert_eq!(carver.step(&mut recorder).unwrap(), CarveStep::Finished);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_step_count_is_bounded() {
        // One forward step per passage and one backtrack per cell.
        let grid = Grid::new(8, 8).unwrap();
        let mut carver = Carver::new(grid, (0, 0), StdRng::seed_from_u64(11)).unwrap();
        let outcome = carver
            .run(&mut NullObserver, &Pacer::unthrottled(), &StopSignal::new())
            .unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(carver.iteration, 63 + 64);
    }

    #[test]
    fn test_observer_notifications() {
        let mut recorder = EventRecorder::new();
        let grid = generate(4, 4, (0, 0), StdRng::seed_from_u64(5), &mut recorder).unwrap();

        assert_eq!(
            recorder.events.first(),
            Some(&MazeEvent::GridReady {
                width: 4,
                height: 4
            })
        );
        assert_eq!(recorder.num_walls_removed(), 15);
        assert_eq!(recorder.cells_with_role(CellRole::Backtracked).len(), 16);

        // Replaying the notifications on an empty grid rebuilds the maze.
        let mut replay = Grid::new(4, 4).unwrap();
        for event in &recorder.events {
            if let MazeEvent::WallRemoved { x, y, direction } = event {
                replay.remove_wall_between((*x, *y), *direction);
            }
        }
        assert_eq!(replay, grid);
    }

    #[test]
    fn test_stop_signal_ends_the_run() {
        let grid = Grid::new(10, 10).unwrap();
        let mut carver = Carver::new(grid, (0, 0), StdRng::seed_from_u64(1)).unwrap();
        let stop = StopSignal::new();
        stop.raise();

        let outcome = carver
            .run(&mut NullObserver, &Pacer::unthrottled(), &stop)
            .unwrap();
        assert_eq!(outcome, RunOutcome::Stopped);
        assert_eq!(carver.iteration, 0);
        assert!(!carver.is_finished());
    }

    #[test]
    fn test_pacing_does_not_change_the_maze() {
        let pacer = Pacer::new(std::time::Duration::from_micros(10));
        let mut carver =
            Carver::new(Grid::new(4, 4).unwrap(), (0, 0), StdRng::seed_from_u64(21)).unwrap();
        carver
            .run(&mut NullObserver, &pacer, &StopSignal::new())
            .unwrap();
        let unpaced = generate(4, 4, (0, 0), StdRng::seed_from_u64(21), &mut NullObserver).unwrap();
        assert_eq!(carver.into_grid(), unpaced);
    }
}
