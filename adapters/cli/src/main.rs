#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for composing and inspecting Maze Quest levels.

use std::{fs, io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use maze_quest_core::{Cell, Difficulty, Grid, LevelNumber, MoveBudget, Position};
use maze_quest_system_generation::compose_level;
use maze_quest_system_pathfinding::shortest_path_length;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "maze-quest", about = "Deterministic maze level tooling")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Composes a level and prints its layout, shortest path, and budget.
    Generate {
        /// One-based level number to compose.
        #[arg(long)]
        level: u32,
        /// Difficulty tier driving the generation tables.
        #[arg(long, value_enum)]
        difficulty: DifficultyArg,
        /// Emits a machine-readable JSON report instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Solves a layout in the grid text format and prints the distance.
    Solve {
        /// Path to the layout file; reads standard input when omitted.
        input: Option<PathBuf>,
    },
}

/// Difficulty tier as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Medium => Self::Medium,
            DifficultyArg::Hard => Self::Hard,
        }
    }
}

/// Machine-readable level report emitted by `generate --json`.
#[derive(Serialize)]
struct LevelReport {
    level: u32,
    difficulty: Difficulty,
    flavor_text: String,
    layout: Vec<String>,
    shortest_path: usize,
    move_budget: u32,
}

/// Entry point for the Maze Quest command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Generate {
            level,
            difficulty,
            json,
        } => generate(LevelNumber::new(level), difficulty.into(), json),
        CliCommand::Solve { input } => solve(input),
    }
}

fn generate(level: LevelNumber, difficulty: Difficulty, json: bool) -> Result<()> {
    let layout = compose_level(level, difficulty);
    let (player, goal) = locate_endpoints(layout.grid())?;
    let Some(shortest_path) = shortest_path_length(layout.grid(), player, goal) else {
        bail!(
            "composed {difficulty:?} level {} is not solvable; this is a generation defect",
            level.get()
        );
    };
    let budget = MoveBudget::for_path(shortest_path, difficulty);

    if json {
        let report = LevelReport {
            level: level.get(),
            difficulty,
            flavor_text: layout.flavor_text().to_owned(),
            layout: layout.grid().to_lines(),
            shortest_path,
            move_budget: budget.get(),
        };
        let rendered =
            serde_json::to_string_pretty(&report).context("serializing the level report")?;
        println!("{rendered}");
        return Ok(());
    }

    println!("{}", layout.flavor_text());
    for line in layout.grid().to_lines() {
        println!("{line}");
    }
    println!("shortest path: {shortest_path} moves");
    println!("move budget:   {} moves", budget.get());
    Ok(())
}

fn solve(input: Option<PathBuf>) -> Result<()> {
    let text = match input {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("reading layout from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            let _ = std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading layout from standard input")?;
            buffer
        }
    };

    let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    let grid = Grid::parse(&lines).context("parsing the grid text format")?;
    let (player, goal) = locate_endpoints(&grid)?;

    match shortest_path_length(&grid, player, goal) {
        Some(distance) => {
            println!("{distance}");
            Ok(())
        }
        None => bail!("the player and goal cells are not connected"),
    }
}

fn locate_endpoints(grid: &Grid) -> Result<(Position, Position)> {
    let Some(player) = grid.find(Cell::Player) else {
        bail!("the layout holds no player cell");
    };
    let Some(goal) = grid.find(Cell::Goal) else {
        bail!("the layout holds no goal cell");
    };
    Ok((player, goal))
}
