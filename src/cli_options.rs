/*
cli_options.rs

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

//! Process command-line options and run the maze.
//!
//! # Examples
//!
//! Carve a reproducible 12x8 maze and solve it from the top-left to the bottom-right cell:
//!
//! ```
//! $ mazewalk --width 12 --height 8 --seed 42
//! ```
//!
//! Watch the carving and the solving, at 20 steps per second:
//!
//! ```
//! $ mazewalk --animate
//! ```
//!
//! Save a maze, then solve it again between two other cells:
//!
//! ```
//! $ mazewalk --seed 7 --save maze.json
//! $ mazewalk --load maze.json --start 3,4 --end 0,9
//! ```

use clap::Parser;
use log::{debug, warn};
use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use mazewalk::config::{COPYRIGHT_NOTICE, DEFAULT_HEIGHT, DEFAULT_WIDTH, MazeConfig};
use mazewalk::generator::carver::Carver;
use mazewalk::generator::grid::Grid;
use mazewalk::generator::path::Path;
use mazewalk::generator::solver::Solver;
use mazewalk::pacing::{RunOutcome, StopSignal};
use mazewalk::render::TextRenderer;
use mazewalk::saver::maze::{SavedMaze, SaverMaze};

/// Exit status when the user interrupts the run (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

/// Carve a perfect maze and find the path between two of its cells.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of columns
    #[arg(short = 'W', long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Number of rows
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Cell where carving begins, as X,Y
    #[arg(short, long, value_parser = parse_cell, default_value = "0,0")]
    generation_start: (usize, usize),

    /// Solver start cell, as X,Y
    #[arg(short, long, value_parser = parse_coord, default_value = "0,0", allow_hyphen_values = true)]
    start: (i64, i64),

    /// Solver end cell, as X,Y [default: bottom-right cell]
    #[arg(short, long, value_parser = parse_coord, allow_hyphen_values = true)]
    end: Option<(i64, i64)>,

    /// Seed for carving. The same seed and size always give the same maze
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between two steps, in milliseconds (0 for no delay)
    #[arg(short, long, default_value_t = 0)]
    pace_ms: u64,

    /// Redraw the maze after each step
    #[arg(short, long, default_value_t = false)]
    animate: bool,

    /// Save the maze, and its solution, to a JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Solve a maze saved with --save instead of carving a new one
    #[arg(short, long, conflicts_with_all = ["width", "height", "generation_start", "seed"])]
    load: Option<PathBuf>,

    /// Only carve the maze
    #[arg(long, default_value_t = false)]
    no_solve: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Split a `X,Y` string.
fn split_pair(s: &str) -> Result<(&str, &str), String> {
    s.split_once(',')
        .map(|(x, y)| (x.trim(), y.trim()))
        .ok_or_else(|| format!("`{s}` is not in the X,Y format"))
}

/// Parse a `X,Y` cell that must have non-negative coordinates.
fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = split_pair(s)?;
    let x: usize = x.parse().map_err(|e| format!("invalid X `{x}`: {e}"))?;
    let y: usize = y.parse().map_err(|e| format!("invalid Y `{y}`: {e}"))?;
    Ok((x, y))
}

/// Parse a `X,Y` cell. Negative coordinates are accepted; the solver replaces them.
fn parse_coord(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = split_pair(s)?;
    let x: i64 = x.parse().map_err(|e| format!("invalid X `{x}`: {e}"))?;
    let y: i64 = y.parse().map_err(|e| format!("invalid Y `{y}`: {e}"))?;
    Ok((x, y))
}

impl Args {
    /// Build the configuration for a new maze.
    fn config(&self) -> MazeConfig {
        let mut config: MazeConfig = MazeConfig::new(self.width, self.height);
        config.generation_start = self.generation_start;
        config.seed = self.seed;
        self.apply_run_options(&mut config);
        config
    }

    /// Copy the options that do not change the maze itself.
    fn apply_run_options(&self, config: &mut MazeConfig) {
        config.start = self.start;
        config.end = self.end;
        config.pace = Duration::from_millis(self.pace_ms);
        config.animate = self.animate;
    }
}

/// Carve a new maze. Return None if the user interrupted the run.
fn carve(
    config: &MazeConfig,
    renderer: &mut TextRenderer,
    stop: &StopSignal,
) -> Result<Option<Grid>, Box<dyn Error>> {
    config.validate()?;
    let mut carver = Carver::new(
        Grid::new(config.width, config.height)?,
        config.generation_start,
        config.rng(),
    )?;
    if carver.run(renderer, &config.pacer(), stop)? == RunOutcome::Stopped {
        return Ok(None);
    }

    let maze: Grid = carver.into_grid();
    debug!(
        "Passages = {}  Perfect = {}",
        maze.open_passages(),
        maze.is_perfect()
    );
    Ok(Some(maze))
}

/// Run the maze and return the exit status.
fn run(args: &Args, stop: &StopSignal) -> Result<u8, Box<dyn Error>> {
    let (config, maze, mut renderer) = match &args.load {
        Some(file) => {
            let saved: SavedMaze = SaverMaze::new(file.clone())
                .get_maze()?
                .ok_or_else(|| format!("{}: no such file", file.display()))?;
            let mut config: MazeConfig = saved.config;
            args.apply_run_options(&mut config);
            let renderer = TextRenderer::from_maze(&saved.maze, config.animate);
            (config, saved.maze, renderer)
        }
        None => {
            let config: MazeConfig = args.config();
            let mut renderer = TextRenderer::new(config.animate);
            match carve(&config, &mut renderer, stop)? {
                Some(maze) => (config, maze, renderer),
                None => return Ok(EXIT_INTERRUPTED),
            }
        }
    };

    let mut solution: Option<Path> = None;
    if !args.no_solve {
        let (mut solver, warnings) = Solver::new(&maze, config.start, config.end());
        for w in &warnings {
            eprintln!("Warning: {w}");
        }
        if solver.run(&mut renderer, &config.pacer(), stop)? == RunOutcome::Stopped {
            return Ok(EXIT_INTERRUPTED);
        }
        solution = Some(solver.path());
    }

    if !config.animate {
        print!("{}", renderer.render());
    }
    if let Some(path) = &solution {
        println!("Path length: {}", path.len());
        debug!("Path: {:?}", path.get());
    }

    if let Some(file) = &args.save {
        SaverMaze::new(file.clone()).save_maze(&SavedMaze::new(config, maze, solution))?;
    }
    Ok(0)
}

/// Parse and process command-line options. Return the exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let stop: StopSignal = StopSignal::new();
    let handler_stop: StopSignal = stop.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_stop.raise()) {
        warn!("Cannot install the Ctrl-C handler: {e}");
    }

    match run(&args, &stop) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_coord(" -1 , -2 "), Ok((-1, -2)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a,1").is_err());
        assert_eq!(parse_cell("0,7"), Ok((0, 7)));
        assert!(parse_cell("-1,0").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["mazewalk"]).unwrap();
        let config = args.config();
        assert_eq!(config, MazeConfig::default());
    }

    #[test]
    fn test_negative_start_is_accepted() {
        let args = Args::try_parse_from([
            "mazewalk", "--start", "-1,-1", "--end", "4,2", "-W", "5", "-H", "3",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!(config.start, (-1, -1));
        assert_eq!(config.end(), (4, 2));
        assert_eq!((config.width, config.height), (5, 3));
    }

    #[test]
    fn test_load_conflicts_with_maze_options() {
        assert!(Args::try_parse_from(["mazewalk", "--load", "m.json", "--seed", "3"]).is_err());
        assert!(Args::try_parse_from(["mazewalk", "--load", "m.json", "--start", "1,1"]).is_ok());
    }
}
