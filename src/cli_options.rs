/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Waypath.

Waypath is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Waypath is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Waypath. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers tuning the generator or checking submissions.
//!
//! # Examples
//!
//! Generate three medium puzzles on a 5x5 grid, only keeping the ones that have a solution:
//!
//! ```text
//! $ waypath -g 5 -f medium -c 3 --verify --summary
//! ```
//!
//! Score a path against a puzzle saved as JSON:
//!
//! ```text
//! $ waypath --puzzle puzzle.json --path 0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2 --elapsed 45000
//! {
//!   "is_valid": true,
//!   "completion_time_seconds": 45,
//!   "move_count": 9,
//!   "efficiency_percent": 100,
//!   "time_bonus": 255,
//!   "stars": 3,
//!   "errors": []
//! }
//! ```

use clap::Parser;
use log::{debug, error};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use waypath::config::EngineConfig;
use waypath::generator::grid::{self, CellId, Difficulty, Puzzle};
use waypath::generator::random_puzzle::Generator;
use waypath::scorer::{self, CompletionResult};

/// Generate Waypath puzzles and score paths.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Grid size (clamped to the configured range)
    #[arg(short, long, default_value_t = 5)]
    grid_size: usize,

    /// Difficulty level for the puzzle
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random generator, to reproduce a puzzle sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Only keep puzzles that have a solution, and print that solution
    #[arg(short, long, default_value_t = false)]
    verify: bool,

    /// Print some statistics after generating the puzzles
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// JSON file that overrides the engine constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON puzzle file to score a path against
    #[arg(short, long, group = "score")]
    puzzle: Option<PathBuf>,

    /// Comma-separated list of cells, such as 0-0,0-1,1-1
    #[arg(long, requires = "score")]
    path: Option<String>,

    /// Time, in milliseconds, the player took to draw the path
    #[arg(short, long, default_value_t = 0, requires = "score")]
    elapsed: u64,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let config: EngineConfig = match &args.config {
        Some(file) => match EngineConfig::from_file(file) {
            Ok(c) => c,
            Err(e) => {
                error!("Cannot load the configuration file {file:?}: {e}");
                return 1;
            }
        },
        None => EngineConfig::default(),
    };
    debug!("Configuration: {config:?}");

    let ret: Result<(), Box<dyn Error>> = match &args.puzzle {
        Some(puzzle_file) => score_path(&args, puzzle_file, &config),
        None => generate(&args, config),
    };
    match ret {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Load a JSON puzzle file and print the score of the path given on the command line.
fn score_path(
    args: &Args,
    puzzle_file: &Path,
    config: &EngineConfig,
) -> Result<(), Box<dyn Error>> {
    let reader: BufReader<File> = BufReader::new(File::open(puzzle_file)?);
    let puzzle: Puzzle = serde_json::from_reader(reader)?;
    let path: Vec<CellId> = grid::parse_path(args.path.as_deref().unwrap_or_default())?;

    debug!("Scoring {} cells against puzzle {}", path.len(), puzzle.id());
    let result: CompletionResult = scorer::score(&path, &puzzle, args.elapsed, config);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Generate and print the requested number of puzzles.
fn generate(args: &Args, config: EngineConfig) -> Result<(), Box<dyn Error>> {
    let mut generator: Generator = match args.seed {
        Some(seed) => Generator::with_seed(config, seed),
        None => Generator::new(config),
    };

    let start: Instant = Instant::now();
    let mut failures: usize = 0;
    let mut waypoints: usize = 0;
    let mut obstacles: usize = 0;

    for i in 0..args.count {
        debug!("Puzzle {i}");

        let (puzzle, solution): (Puzzle, Option<Vec<CellId>>) = if args.verify {
            match generator.generate_verified(args.grid_size, args.difficulty) {
                Some((p, s)) => (p, Some(s)),
                None => {
                    failures += 1;
                    continue;
                }
            }
        } else {
            (generator.generate(args.grid_size, args.difficulty), None)
        };

        waypoints += puzzle.waypoints().len();
        obstacles += puzzle.obstacles().len();

        println!("{puzzle}");
        println!("{}", serde_json::to_string(&puzzle)?);
        if let Some(s) = solution {
            let cells: Vec<String> = s.iter().map(CellId::to_string).collect();
            println!("solution: {}", cells.join(","));
        }
        println!();
    }

    // Print some stats
    if args.summary {
        let generated: usize = args.count - failures;
        let average = |total: usize| {
            if generated == 0 {
                0.0
            } else {
                total as f32 / generated as f32
            }
        };
        println!(
            "
        total time = {}s
         generated = {}
          failures = {}
 average waypoints = {}
 average obstacles = {}",
            start.elapsed().as_secs_f32(),
            generated,
            failures,
            average(waypoints),
            average(obstacles)
        );
    }
    Ok(())
}
