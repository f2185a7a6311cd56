//! CLI entry point for the Rush Hour solver.
//!
//! Usage:
//!   rush-solver solve <puzzle.json> [options]
//!   rush-solver solve --stdin [options]
//!   rush-solver render <puzzle.json> [--no-color]
//!
//! Options:
//!   --max-depth <n>          Abort after expanding a node at this depth (default: 500)
//!   --progress-interval <n>  Log progress every n expanded nodes, 0 to disable (default: 1000)
//!   --show                   Print every board of the solution to stderr
//!   --no-color               Render boards without ANSI colors
//!
//! Progress and diagnostics go through `log`; set `RUST_LOG=info` to see them.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;

use rush_solver::{render, Board, Move, PuzzleConfig, RenderOptions, SolverConfig, SolverResult};

#[derive(Parser)]
#[command(name = "rush-solver")]
#[command(about = "Breadth-first solver for Rush Hour sliding-block puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest sequence of moves that frees the target vehicle
    Solve {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Abort the search after expanding a node at this depth
        #[arg(long, default_value = "500")]
        max_depth: usize,

        /// Log progress every this many expanded nodes (0 disables it)
        #[arg(long, default_value = "1000")]
        progress_interval: usize,

        /// Print every board along the solution to stderr
        #[arg(long)]
        show: bool,

        /// Render boards without colors
        #[arg(long)]
        no_color: bool,
    },

    /// Print the initial board of a puzzle
    Render {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Render without colors
        #[arg(long)]
        no_color: bool,
    },
}

/// Output format for a solve run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    solved: bool,
    outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_cost: Option<usize>,
    moves: Vec<Move>,
    nodes_expanded: usize,
    states_explored: usize,
    max_frontier: usize,
    time_elapsed_ms: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(solved) => std::process::exit(if solved { 0 } else { 1 }),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded in the puzzle sense
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Solve {
            file,
            stdin,
            max_depth,
            progress_interval,
            show,
            no_color,
        } => {
            let config = read_puzzle(file, stdin)?;
            let puzzle = config.build().context("Invalid puzzle")?;

            let solver_config = SolverConfig {
                max_depth,
                progress_interval,
            };
            let result = puzzle.solve(&solver_config)?;

            if show {
                show_solution(&result, !no_color)?;
            }

            let output = format_result(config.id.clone(), &result);
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(result.is_solved())
        }
        Commands::Render {
            file,
            stdin,
            no_color,
        } => {
            let config = read_puzzle(file, stdin)?;
            let board = config.build_board().context("Invalid puzzle")?;
            let options = RenderOptions {
                color: !no_color,
                title: config.id.clone(),
                ..RenderOptions::default()
            };
            print!("{}", render(&board, &options));
            Ok(true)
        }
    }
}

fn read_puzzle(file: Option<PathBuf>, stdin: bool) -> anyhow::Result<PuzzleConfig> {
    let json_content = if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file {:?}", path))?
    } else {
        bail!("Must provide either a file path or --stdin");
    };

    PuzzleConfig::from_json(&json_content).context("Error parsing puzzle JSON")
}

fn show_solution(result: &SolverResult, color: bool) -> anyhow::Result<()> {
    let path = result.path();
    let moves = result.moves();

    for (step, state) in path.iter().enumerate() {
        let board = Board::from_state(state)?;
        let title = match step.checked_sub(1).and_then(|i| moves.get(i)) {
            Some(mv) => format!("Step {}: {} {}", step, mv.vehicle, mv.direction),
            None => "Initial board".to_string(),
        };
        let options = RenderOptions {
            color,
            title: Some(title),
            padding: "  ".to_string(),
        };
        eprintln!("{}", render(&board, &options));
    }
    Ok(())
}

fn format_result(id: Option<String>, result: &SolverResult) -> SolveOutput {
    SolveOutput {
        id,
        solved: result.is_solved(),
        outcome: result.outcome.name().to_string(),
        path_cost: result.node().map(|node| node.path_cost()),
        moves: result.moves(),
        nodes_expanded: result.nodes_expanded,
        states_explored: result.states_explored,
        max_frontier: result.max_frontier,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}
