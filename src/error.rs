/*
error.rs

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

//! Errors raised while building, carving, or solving a maze.
//!
//! Out-of-bounds solver coordinates are not errors: the solver replaces them and reports a
//! [`crate::generator::solver::ClampWarning`] instead.

use std::error::Error;
use std::fmt;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The grid must have at least one column and one row.
    InvalidDimensions { width: usize, height: usize },

    /// The carving start cell is outside the grid. The caller must validate it before carving.
    StartOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// An internal consistency fault, such as backtracking past an empty stack. This only
    /// happens when the wall layout is not a spanning tree of the grid.
    BrokenInvariant(String),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::InvalidDimensions { width, height } => {
                write!(f, "invalid maze dimensions {width}x{height}: both must be positive")
            }
            MazeError::StartOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "start cell ({x}, {y}) is outside of the {width}x{height} grid"
            ),
            MazeError::BrokenInvariant(msg) => write!(f, "maze invariant broken: {msg}"),
        }
    }
}

impl Error for MazeError {}
