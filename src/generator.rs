/*
generator.rs

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

//! Carve perfect mazes and find paths through them.
//!
//! A maze is a [`grid::Grid`] of [`cell_walls::CellWalls`]. It starts fully walled.
//!
//! * A [`carver::Carver`] turns the grid into a perfect maze: the open passages form a spanning
//!   tree, so there is exactly one path between any two cells.
//!   The carver draws its branches from a random source that the caller provides. With a seeded
//!   source, the same maze can be carved again.
//!
//! * A [`solver::Solver`] finds the path between two cells of a finished maze.
//!   It works on its own copy of the walls and closes each passage it goes through, instead of
//!   remembering the cells it visited. The result is a [`path::Path`].
//!
//! Both algorithms run step by step. Callers drive them with `step` (or `run`, which loops over
//! `step`), and follow their progress through a [`crate::observer::MazeObserver`].

pub mod carver;
pub mod cell_walls;
pub mod direction;
pub mod grid;
pub mod path;
pub mod solver;
