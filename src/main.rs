//! Interactive command-line play against the search engine.
//!
//! The engine always plays `X`; the human plays `O`. Who places first is
//! chosen by flag or by coin flip.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridline_mcts::games::{
    ExtendableMove, ExtendableState, ExtendableTicTacToe, TicTacToe, TicTacToeMove, TicTacToeState,
};
use gridline_mcts::{Game, GameState, Player, SearchEngine, SearchNode, CROSS, NOUGHT};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    /// Classic 3x3 board.
    Fixed,
    /// 3x3 window in a 9x9 super-grid, growable in eight directions.
    Extendable,
}

#[derive(Parser, Debug)]
#[command(name = "gridline", about = "Play three-in-a-row against an MCTS engine")]
struct Args {
    /// Board variant to play.
    #[arg(long, value_enum, default_value_t = Variant::Fixed)]
    variant: Variant,

    /// Search iterations per engine move (default 50000 fixed, 10000 extendable).
    #[arg(long)]
    iterations: Option<u32>,

    /// RNG seed for reproducible engine play.
    #[arg(long)]
    seed: Option<u64>,

    /// Whether the human places first; coin flip when omitted.
    #[arg(long)]
    human_first: Option<bool>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let human_first = args
        .human_first
        .unwrap_or_else(|| rand::rng().random_bool(0.5));
    println!(
        "You are O, the engine is X. {} first.",
        if human_first { "You go" } else { "The engine goes" }
    );

    match args.variant {
        Variant::Fixed => {
            let iterations = args.iterations.unwrap_or(50_000);
            play_fixed(iterations, args.seed, human_first)
        }
        Variant::Extendable => {
            let iterations = args.iterations.unwrap_or(10_000);
            play_extendable(iterations, args.seed, human_first)
        }
    }
}

/// Build a per-turn engine over the current position and pick its reply.
fn engine_move<S: GameState>(
    state: &S,
    iterations: u32,
    seed: Option<u64>,
    opponent_first: bool,
    turn: u64,
) -> Result<S> {
    let root = SearchNode::new(state.clone());
    let mut engine = match seed {
        Some(seed) => SearchEngine::with_seed(root, opponent_first, seed.wrapping_add(turn)),
        None => SearchEngine::new(root, opponent_first),
    };
    let best = engine.run(iterations).context("engine search failed")?;
    info!(turn, score = best.score(), playouts = best.playouts(), "engine moved");
    Ok(best.state().clone())
}

fn announce(winner: Option<Player>) {
    match winner {
        Some(CROSS) => println!("The engine (X) wins."),
        Some(_) => println!("You (O) win!"),
        None => println!("Draw."),
    }
}

fn play_fixed(iterations: u32, seed: Option<u64>, human_first: bool) -> Result<()> {
    let game = TicTacToe;
    let mut state = game.start();
    let mut human_turn = human_first;
    let mut turn: u64 = 0;

    while !state.is_terminal() {
        println!("\n{}", state.render());
        if human_turn {
            state = human_fixed_move(&state)?;
        } else {
            state = engine_move(&state, iterations, seed, human_first, turn)?;
        }
        human_turn = !human_turn;
        turn += 1;
    }
    println!("\n{}", state.render());
    announce(state.winner());
    Ok(())
}

/// Prompt for `row col` until a legal placement is given.
fn human_fixed_move(state: &TicTacToeState) -> Result<TicTacToeState> {
    let stdin = io::stdin();
    loop {
        print!("Your move (row col, 0-2): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        let mut parts = line.split_whitespace();
        let parsed = match (parts.next(), parts.next()) {
            (Some(row), Some(col)) => row.parse::<usize>().ok().zip(col.parse::<usize>().ok()),
            _ => None,
        };
        let Some((row, col)) = parsed else {
            println!("Enter two numbers, e.g. `1 2`.");
            continue;
        };
        let mv = TicTacToeMove {
            player: NOUGHT,
            row,
            col,
        };
        match state.next(&mv) {
            Ok(next) => return Ok(next),
            Err(err) => println!("Illegal move: {err}"),
        }
    }
}

fn play_extendable(iterations: u32, seed: Option<u64>, human_first: bool) -> Result<()> {
    let game = ExtendableTicTacToe;
    let mut state = game.start();
    let mut human_turn = human_first;
    let mut turn: u64 = 0;

    while !state.is_terminal() {
        println!("\n{}", state.render());
        if human_turn {
            state = human_extendable_move(&state)?;
        } else {
            state = engine_move(&state, iterations, seed, human_first, turn)?;
        }
        human_turn = !human_turn;
        turn += 1;
    }
    println!("\n{}", state.render());
    announce(state.winner());
    Ok(())
}

/// List the legal moves with window-local coordinates and prompt for an index.
fn human_extendable_move(state: &ExtendableState) -> Result<ExtendableState> {
    let moves = state.moves(NOUGHT)?;
    let row_min = state.position().row_min();
    let col_min = state.position().col_min();
    println!("Moves:");
    for (index, mv) in moves.iter().enumerate() {
        match mv {
            ExtendableMove::Place { row, col, .. } => {
                println!("  {index}: place at ({}, {})", row - row_min, col - col_min);
            }
            ExtendableMove::Extend { direction, .. } => {
                println!("  {index}: extend {direction:?}");
            }
        }
    }

    let stdin = io::stdin();
    loop {
        print!("Your move (number): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("input closed");
        }
        let Ok(index) = line.trim().parse::<usize>() else {
            println!("Enter a move number.");
            continue;
        };
        let Some(mv) = moves.get(index) else {
            println!("No such move.");
            continue;
        };
        match state.next(mv) {
            Ok(next) => return Ok(next),
            Err(err) => println!("Illegal move: {err}"),
        }
    }
}
