//! # gridline-mcts
//!
//! Monte Carlo tree search for three-in-a-row games, with two board
//! variants: the classic fixed 3x3 board and an extendable board whose 3x3
//! playing window can grow inside a bounded 9x9 super-grid.
//!
//! The engine is generic over [`GameState`]; each game supplies its rules,
//! a canonical key for symmetry deduplication, and the tuned static
//! evaluator its rollouts are scored with.

// Generic MCTS infrastructure
mod canonicalization; // D4 symmetry keys
pub mod error; // Error taxonomy
pub mod game_trait; // Game trait abstraction
mod mcts; // Search engine
mod node; // Search tree node

#[cfg(test)]
mod mcts_tests;
#[cfg(test)]
mod node_tests;

// Game implementations
pub mod games;

pub use error::{GameError, SearchError};
pub use game_trait::{opponent, Game, GameState, Player, CROSS, NOUGHT};
pub use mcts::{ucb1, SearchEngine};
pub use node::SearchNode;
