//! SpeedGo: a small Go rule engine with a random computer opponent.
//!
//! ## Usage
//!
//! - `speedgo` / `speedgo play` - Play Black against the computer in the terminal
//! - `speedgo gtp` - Start a GTP server for GUI integration
//! - `speedgo selfplay` - Let two random players fill a board
//!
//! Log output goes to stderr and is controlled by `RUST_LOG`.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use speedgo::constants::MAX_GAME_LEN;
use speedgo::game::{ComputerTurn, Game, Outcome};
use speedgo::gtp::GtpEngine;
use speedgo::playout::random_game;
use speedgo::position::{Position, parse_coord, str_coord};

/// SpeedGo: a minimal Go engine with a random computer opponent
#[derive(Parser)]
#[command(name = "speedgo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the computer player (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play Black against the computer in the terminal
    Play,
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play random moves for both sides and print the final board
    Selfplay {
        /// Stop after this many stones have been placed
        #[arg(long, default_value_t = MAX_GAME_LEN)]
        max_moves: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::with_rng(rng);
            engine.run(io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Selfplay { max_moves }) => {
            run_selfplay(rng, max_moves);
            Ok(())
        }
        Some(Commands::Play) | None => run_play(Game::with_rng(rng)),
    }
}

fn run_selfplay(mut rng: fastrand::Rng, max_moves: usize) {
    let mut pos = Position::new();
    let summary = random_game(&mut pos, &mut rng, max_moves);
    println!("{}", pos.board());
    println!("Moves: {}", summary.moves);
    println!(
        "Captures: Black {}, White {}",
        summary.black_captures, summary.white_captures
    );
    match summary.stuck {
        Some(color) => println!("{color} has no legal move"),
        None => println!("Stopped after {max_moves} moves"),
    }
}

fn run_play(mut game: Game) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("SpeedGo: you are Black (X). Enter a vertex like D4, or 'quit'.\n");
    loop {
        if game.computer_to_move() {
            match game.computer_move() {
                ComputerTurn::Played { at, captured } => {
                    println!("White plays {}", str_coord(at));
                    if captured != 0 {
                        println!("White captured {captured}");
                    }
                }
                ComputerTurn::NoMove => println!("White has no legal move"),
            }
            continue;
        }
        if game.is_over() {
            break;
        }

        println!("{}", game.position().board());
        print!("Black> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            game.resign();
            break;
        };
        let line = line.context("reading move")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("resign") {
            game.resign();
            break;
        }
        let Some(pt) = parse_coord(input) else {
            println!("Not a vertex: {input}");
            continue;
        };
        match game.human_move(pt) {
            Ok(0) => {}
            Ok(captured) => println!("You captured {captured}"),
            Err(err) => println!("{err}"),
        }
    }

    println!("{}", game.position().board());
    match game.outcome() {
        Some(Outcome::Won) => println!("YOU WIN!"),
        Some(Outcome::Lost) => println!("YOU LOSE!"),
        Some(Outcome::Abandoned) | None => println!("Game abandoned"),
    }
    println!("Steps: {}", game.steps());
    println!("Time: {:.1} s", game.elapsed().as_secs_f64());
    Ok(())
}
