//! Error taxonomy for the game contract and the search engine.
//!
//! All of these represent programming-contract violations rather than
//! recoverable runtime conditions: the engine assumes a well-formed game
//! implementation and fails fast instead of masking a broken caller.

use thiserror::Error;

use crate::game_trait::Player;
use crate::games::extendable::Direction;

/// Contract violations raised by the board layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// `moves(p)` was requested for the player who made the last move.
    #[error("player {player} cannot move twice in a row")]
    ConsecutiveMoves { player: Player },

    /// Placement onto a cell that already holds a mark.
    #[error("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    /// Cell query or placement outside the currently playable window.
    #[error("cell ({row}, {col}) is outside the active window")]
    OutOfWindow { row: usize, col: usize },

    /// A window extension that would leave the bounded super-grid.
    #[error("cannot extend window {direction:?}: super-grid boundary reached")]
    ExtensionBlocked { direction: Direction },

    /// Catch-all for any other malformed move handed to `next`.
    #[error("illegal move for this state")]
    IllegalMove,
}

/// Failures surfaced by the search engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Selection or final move choice reached a node with no children.
    /// Indicates an expansion bug or a root with no legal moves.
    #[error("selection reached a node with no children")]
    NoChildren,

    /// The game layer reported a contract violation mid-search.
    #[error(transparent)]
    Game(#[from] GameError),
}
