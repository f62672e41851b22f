//! # Game Trait
//!
//! Core contracts that the search engine consumes. The engine never inspects
//! board storage or move contents - all game-specific logic lives behind
//! these traits, and moves are opaque tokens passed back through [`GameState::next`].
//!
//! ## Design Principles
//!
//! - **Immutable states**: `next` returns a fresh state; applying a move
//!   never mutates the source. This is what lets tree nodes share nothing.
//! - **Opaque moves**: the engine only generates, applies and stores moves;
//!   it never pattern-matches on them.
//! - **Heuristic hooks on the trait**: the rollout policy needs a static
//!   evaluator and a two-in-a-row threat test, both of which are
//!   board-geometry questions, so they live here rather than in the engine.

use std::fmt::Debug;

use crate::error::GameError;

/// Player identifier. Two-player games only: `0` or `1`.
pub type Player = usize;

/// The nought player (plays `O`).
pub const NOUGHT: Player = 0;

/// The cross player (plays `X`); opens both shipped variants.
pub const CROSS: Player = 1;

/// The other player.
#[inline]
pub fn opponent(player: Player) -> Player {
    1 - player
}

/// A position the engine can search from.
///
/// Implementations are cheap-to-clone value types: the tree clones states
/// freely during expansion and rollout.
pub trait GameState: Clone {
    /// Move type for this game. Opaque to the engine.
    type Move: Clone + Debug;

    /// Which player id opens the game this state belongs to. The engine
    /// optimizes for this id.
    fn opener(&self) -> Player;

    /// The player to act in this position.
    fn player(&self) -> Player;

    /// True once the game has ended (decisive or drawn).
    fn is_terminal(&self) -> bool;

    /// The winning player, if the position is decisively terminal.
    /// `None` for drawn terminals and for all non-terminal positions.
    fn winner(&self) -> Option<Player>;

    /// All legal moves for `player`.
    ///
    /// Fails with [`GameError::ConsecutiveMoves`] when `player` also made
    /// the last move - that is a caller bug, not a game situation.
    fn moves(&self, player: Player) -> Result<Vec<Self::Move>, GameError>;

    /// The successor position after `mv`. Fails fast on any illegal move.
    fn next(&self, mv: &Self::Move) -> Result<Self, GameError>;

    /// Symmetry-invariant key for this position, identical for all eight
    /// rotations/reflections of the active window. Used only for
    /// deduplication, never as state.
    fn canonical_key(&self) -> String;

    /// Static evaluation of this position from `perspective`'s point of
    /// view. `opponent_first` selects the defensive weighting used when the
    /// engine's side moved second.
    fn evaluate(&self, perspective: Player, opponent_first: bool) -> i32;

    /// True if `player` has three cells in a line holding exactly two of
    /// their marks and one empty cell, anywhere in the active window.
    fn open_two(&self, player: Player) -> bool;

    /// Evaluation-delta threshold past which a rollout is scored as an
    /// imminent win. `None` disables the threshold bonus for this game.
    fn surge_threshold() -> Option<i32> {
        None
    }
}

/// A playable game: produces the starting position and names the opener.
pub trait Game {
    type State: GameState;

    /// The starting position.
    fn start(&self) -> Self::State;

    /// Which player id moves first.
    fn opener(&self) -> Player;
}
