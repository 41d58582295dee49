/*
maze.rs

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

//! Save and restore a finished maze and its solution.
//!
//! The saved object is a serialization of the [`SavedMaze`] object in JSON format by using
//! [`serde`]. A restored maze can be solved again, with other start and end cells.

use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::generator::grid::Grid;
use crate::generator::path::Path;

/// File name used when the save location is a directory.
pub const DEFAULT_FILE_NAME: &str = "maze.json";

/// A finished maze, the configuration that produced it, and optionally its solution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedMaze {
    /// Parameters of the run.
    pub config: MazeConfig,

    /// Carved maze.
    pub maze: Grid,

    /// Path found by the solver, if the maze was solved.
    pub solution: Option<Path>,

    /// Creation date and time, in RFC 3339 format.
    pub created: String,
}

impl SavedMaze {
    /// Create a [`SavedMaze`] object stamped with the current local time.
    pub fn new(config: MazeConfig, maze: Grid, solution: Option<Path>) -> Self {
        Self {
            config,
            maze,
            solution,
            created: Local::now().to_rfc3339(),
        }
    }
}

/// Object to save and restore a maze.
pub struct SaverMaze {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverMaze {
    /// Create a [`SaverMaze`] object.
    ///
    /// The provided [`PathBuf`] is the path to the save file. If it is a directory, the maze is
    /// saved in the [`DEFAULT_FILE_NAME`] file of that directory.
    pub fn new(mut save_file: PathBuf) -> Self {
        if save_file.is_dir() {
            save_file.push(DEFAULT_FILE_NAME);
        }
        debug!("Maze file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the [`SavedMaze`] object from the save file.
    ///
    /// Return None if the file does not exist. A file whose grid does not match its dimensions,
    /// whose walls are not paired, or whose passages do not form a perfect maze, is refused.
    pub fn get_maze(&self) -> Result<Option<SavedMaze>, Box<dyn Error>> {
        let file: File;
        match File::open(&self.save_file) {
            Ok(f) => file = f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        }
        let reader: BufReader<File> = BufReader::new(file);
        let saved: SavedMaze = serde_json::from_reader(reader)?;

        saved.maze.check_shape()?;
        if !saved.maze.is_consistent() {
            return Err(Box::new(MazeError::BrokenInvariant(format!(
                "walls are not paired in {:?}",
                self.save_file
            ))));
        }
        // The solver is only correct on a spanning tree
        if !saved.maze.is_perfect() {
            return Err(Box::new(MazeError::BrokenInvariant(format!(
                "passages in {:?} do not form a perfect maze",
                self.save_file
            ))));
        }
        Ok(Some(saved))
    }

    /// Save the provided [`SavedMaze`] object.
    pub fn save_maze(&self, saved: &SavedMaze) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, saved)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved maze.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::carver::generate;
    use crate::generator::direction::Direction;
    use crate::generator::solver::solve;
    use crate::observer::NullObserver;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::env;
    use std::fs;

    fn temp_file(name: &str) -> PathBuf {
        let mut p: PathBuf = env::temp_dir();
        p.push(format!("mazewalk-{}-{name}.json", std::process::id()));
        p
    }

    #[test]
    fn test_save_and_restore() {
        let config = MazeConfig::new(6, 4);
        let maze = generate(6, 4, (0, 0), StdRng::seed_from_u64(9), &mut NullObserver).unwrap();
        let (path, _) = solve(&maze, (0, 0), (5, 3), &mut NullObserver).unwrap();
        let saved = SavedMaze::new(config, maze, Some(path));

        let saver = SaverMaze::new(temp_file("restore"));
        saver.save_maze(&saved).unwrap();
        let restored = saver.get_maze().unwrap().expect("the file should exist");
        saver.delete_save();

        assert_eq!(restored, saved);
        assert!(restored.maze.is_perfect());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let saver = SaverMaze::new(temp_file("missing"));
        saver.delete_save();
        assert!(saver.get_maze().unwrap().is_none());
    }

    #[test]
    fn test_unpaired_walls_are_refused() {
        let maze = Grid::new(2, 1).unwrap();
        let saved = SavedMaze::new(MazeConfig::new(2, 1), maze, None);
        let json: String = serde_json::to_string(&saved)
            .unwrap()
            .replacen("\"right\":true", "\"right\":false", 1);

        let file = temp_file("unpaired");
        fs::write(&file, json).unwrap();
        let saver = SaverMaze::new(file);
        let res = saver.get_maze();
        saver.delete_save();
        assert!(res.is_err());
    }

    #[test]
    fn test_maze_with_a_loop_is_refused() {
        // (0,0) - (1,0) - (2,0)
        //           |       |
        //         (1,1) - (2,1)
        let mut maze = Grid::new(3, 2).unwrap();
        maze.remove_wall_between((0, 0), Direction::Right);
        maze.remove_wall_between((1, 0), Direction::Right);
        maze.remove_wall_between((2, 0), Direction::Down);
        maze.remove_wall_between((2, 1), Direction::Left);
        maze.remove_wall_between((1, 1), Direction::Up);
        assert!(maze.is_consistent());
        assert!(!maze.is_perfect());

        let saver = SaverMaze::new(temp_file("loop"));
        saver
            .save_maze(&SavedMaze::new(MazeConfig::new(3, 2), maze, None))
            .unwrap();
        let res = saver.get_maze();
        saver.delete_save();
        assert!(res.is_err(), "a maze with a loop should be refused");
    }

    #[test]
    fn test_disconnected_maze_is_refused() {
        let mut maze = Grid::new(2, 2).unwrap();
        maze.remove_wall_between((0, 0), Direction::Right);
        maze.remove_wall_between((0, 1), Direction::Right);
        assert!(maze.is_consistent());

        let saver = SaverMaze::new(temp_file("disconnected"));
        saver
            .save_maze(&SavedMaze::new(MazeConfig::new(2, 2), maze, None))
            .unwrap();
        let res = saver.get_maze();
        saver.delete_save();
        assert!(res.is_err(), "a disconnected maze should be refused");
    }

    #[test]
    fn test_directory_gets_default_file_name() {
        let saver = SaverMaze::new(env::temp_dir());
        assert!(saver.save_file.ends_with(DEFAULT_FILE_NAME));
    }
}
