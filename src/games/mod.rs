//! # Game Implementations
//!
//! Board variants implementing the [`crate::game_trait`] contracts.
//!
//! Each game has its own submodule with:
//! - Position representation (an `ndarray` grid of [`Cell`]s)
//! - Move definitions
//! - Game rules (move generation, winner/terminal tests)
//! - The tuned static evaluator its rollouts are scored with
//!
//! ## Available Games
//!
//! - **tictactoe**: the fixed 3x3 board
//! - **extendable**: a 3x3 window inside a bounded 9x9 super-grid that can
//!   grow outward in eight compass directions

pub mod extendable;
pub mod tictactoe;

pub use extendable::{Direction, ExtendableMove, ExtendableState, ExtendableTicTacToe};
pub use tictactoe::{TicTacToe, TicTacToeMove, TicTacToeState};

use crate::game_trait::{Player, NOUGHT};

/// One board cell. `Unavailable` only occurs in the extensible variant, for
/// cells outside the currently playable window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Unavailable,
    Empty,
    Taken(Player),
}

impl Cell {
    /// Character rendering used by board output and canonical keys.
    pub fn to_char(self) -> char {
        match self {
            Cell::Unavailable => '?',
            Cell::Empty => '.',
            Cell::Taken(NOUGHT) => 'O',
            Cell::Taken(_) => 'X',
        }
    }
}

/// 20 points when `line` holds exactly two of `player`'s marks and one empty
/// cell, zero otherwise. The building block of both variants' evaluators.
pub(crate) fn open_two_score(line: [Cell; 3], player: Player) -> i32 {
    let mut own = 0;
    let mut empty = 0;
    for cell in line {
        if cell == Cell::Taken(player) {
            own += 1;
        } else if cell == Cell::Empty {
            empty += 1;
        }
    }
    if own == 2 && empty == 1 {
        20
    } else {
        0
    }
}

/// True when `line` is an open two for `player`.
pub(crate) fn line_is_open_two(line: [Cell; 3], player: Player) -> bool {
    open_two_score(line, player) > 0
}

/// Terminal contribution to the evaluator, asymmetric in who opened: a win
/// counts 140 when the engine's side opened and 100 otherwise, with the loss
/// term mirrored. Empirically tuned weights, reproduced as-is.
pub(crate) fn decisive_score(winner: Player, perspective: Player, opponent_first: bool) -> i32 {
    if winner == perspective {
        if opponent_first {
            100
        } else {
            140
        }
    } else if opponent_first {
        -140
    } else {
        -100
    }
}
