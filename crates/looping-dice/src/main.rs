//! CLI entry point for the looping dice solver.
//!
//! Usage:
//!   looping-dice explore <puzzle.json> [options]
//!   looping-dice solve <puzzle.json> [options]
//!   looping-dice scramble <puzzle.json> [options]
//!
//! Pass `--stdin` instead of a file to read the puzzle from stdin.
//! Set `RUST_LOG=debug` for per-round search progress.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use looping_dice::{
    format_path, scramble, solve, Board, ConfigError, Explorer, Puzzle, PuzzleConfig,
    SearchConfig,
};

#[derive(Parser)]
#[command(name = "looping-dice")]
#[command(about = "Explore and solve looping dice puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Path to puzzle JSON file (use --stdin to read from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read puzzle from stdin instead of file
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
struct Limits {
    /// Maximum search depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Maximum number of boards to keep in memory
    #[arg(long)]
    max_states: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every board reachable from the initial board
    Explore {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        limits: Limits,

        /// Stop after printing this many boards
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Find a shortest move sequence from the initial board to the goal
    Solve {
        #[command(flatten)]
        input: Input,

        #[command(flatten)]
        limits: Limits,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Apply random moves to the initial board
    Scramble {
        #[command(flatten)]
        input: Input,

        /// Number of random moves
        #[arg(long, default_value = "100000")]
        moves: usize,

        /// Seed for reproducible scrambles
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// One explored board, as printed with --json
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DiscoveryOutput {
    board: Vec<Vec<String>>,
    path: String,
    depth: usize,
    distance: usize,
}

/// Solver result, as printed with --json
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolutionOutput {
    path: String,
    length: usize,
    depth: usize,
    forward_explored: usize,
    backward_explored: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Explore {
            input,
            limits,
            limit,
            json,
        } => {
            let puzzle = load_or_exit(&input);
            let config = search_config(&puzzle, &limits);
            let mut explorer = Explorer::new(puzzle.initial, config);

            let mut printed = 0;
            for discovery in explorer.by_ref().take(limit.unwrap_or(usize::MAX)) {
                if json {
                    let output = DiscoveryOutput {
                        board: board_rows(&discovery.board),
                        path: format_path(&discovery.path),
                        depth: discovery.depth,
                        distance: discovery.distance,
                    };
                    print_json(&output, false);
                } else {
                    println!("{}", discovery.board);
                    println!("{}", format_path(&discovery.path));
                    println!("{}", discovery.distance);
                    println!();
                }
                printed += 1;
            }
            info!(
                "printed {} boards, {} seen{}",
                printed,
                explorer.seen(),
                if explorer.truncated() { " (truncated)" } else { "" }
            );
        }
        Commands::Solve {
            input,
            limits,
            json,
        } => {
            let puzzle = load_or_exit(&input);
            let goal = match puzzle.goal() {
                Ok(goal) => goal.clone(),
                Err(e) => exit_with(&e.to_string(), e.exit_code()),
            };
            let config = search_config(&puzzle, &limits);

            match solve(&puzzle.initial, &goal, &config) {
                Ok(solution) => {
                    let path = format_path(&solution.path);
                    if json {
                        let output = SolutionOutput {
                            path,
                            length: solution.len(),
                            depth: solution.depth,
                            forward_explored: solution.forward_explored,
                            backward_explored: solution.backward_explored,
                        };
                        print_json(&output, true);
                    } else {
                        println!("# {} ({})", path, solution.len());
                    }
                }
                Err(e) => exit_with(&e.to_string(), e.exit_code()),
            }
        }
        Commands::Scramble { input, moves, seed } => {
            let puzzle = load_or_exit(&input);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let scrambled = scramble(&puzzle.initial, &puzzle.rules, moves, &mut rng);
            println!("{}", scrambled);
        }
    }
}

fn load_or_exit(input: &Input) -> Puzzle {
    match load(input) {
        Ok(puzzle) => puzzle,
        Err(e) => exit_with(&e.to_string(), e.exit_code()),
    }
}

/// Read, parse and validate the puzzle
fn load(input: &Input) -> Result<Puzzle, ConfigError> {
    let json_content = if input.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = &input.file {
        fs::read_to_string(path)?
    } else {
        exit_with("Must provide either a file path or --stdin", 5);
    };

    let config: PuzzleConfig = serde_json::from_str(&json_content)?;
    config.validate()
}

fn search_config(puzzle: &Puzzle, limits: &Limits) -> SearchConfig {
    SearchConfig {
        rules: puzzle.rules,
        max_depth: limits.max_depth,
        max_states: limits.max_states,
    }
}

fn board_rows(board: &Board) -> Vec<Vec<String>> {
    board
        .to_rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => exit_with(&format!("Failed to render JSON: {}", e), 5),
    }
}

fn exit_with(message: &str, code: i32) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(code);
}
