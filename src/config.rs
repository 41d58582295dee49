/*
config.rs

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

//! Application constants and maze configuration.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::MazeError;
use crate::pacing::Pacer;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;

/// Delay between two steps when animating without an explicit pace (20 steps per second).
pub const ANIMATION_STEP: Duration = Duration::from_millis(50);

/// Parameters of a maze run: one generation followed by one solve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// Cell where carving begins. Must be inside the grid.
    pub generation_start: (usize, usize),

    /// Requested solver start cell. Out-of-bounds values are replaced by the solver.
    pub start: (i64, i64),

    /// Requested solver end cell. Defaults to the bottom-right cell.
    pub end: Option<(i64, i64)>,

    /// Seed for the carving random source. Without a seed, runs are not reproducible.
    pub seed: Option<u64>,

    /// Delay between two steps. Zero means unthrottled, unless [`MazeConfig::animate`] is set.
    pub pace: Duration,

    /// Whether the renderer redraws the maze after each step.
    pub animate: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl MazeConfig {
    /// Create a [`MazeConfig`] object for a grid of the given size, with the other parameters set
    /// to their defaults.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            generation_start: (0, 0),
            start: (0, 0),
            end: None,
            seed: None,
            pace: Duration::ZERO,
            animate: false,
        }
    }

    /// Verify the grid dimensions.
    ///
    /// # Errors
    ///
    /// Return [`MazeError::InvalidDimensions`] when the width or the height is zero.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Return the requested end cell, or the bottom-right cell if none was given.
    pub fn end(&self) -> (i64, i64) {
        self.end
            .unwrap_or((self.width as i64 - 1, self.height as i64 - 1))
    }

    /// Build the random source for carving.
    ///
    /// A seeded source replays the same maze for the same seed and dimensions.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Build the step pacer.
    pub fn pacer(&self) -> Pacer {
        if self.pace.is_zero() && self.animate {
            Pacer::new(ANIMATION_STEP)
        } else {
            Pacer::new(self.pace)
        }
    }
}
