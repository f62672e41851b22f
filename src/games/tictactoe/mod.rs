//! # Tic-Tac-Toe Game Implementation
//!
//! The fixed 3x3 board variant.
//!
//! ## State Representation
//! - 3x3 grid of [`Cell`]s (never `Unavailable` here)
//! - last mover (`None` before the first placement) and a move counter
//!
//! ## Moves
//! - Placement only: `(player, row, col)`
//!
//! ## Rules
//! - Players alternate placing marks
//! - Win: three in a row (horizontal, vertical, or diagonal)
//! - Draw: board full with no winner
//!
//! The evaluator weights (terminal 100/140 split, center +10, corners +5,
//! open-two 20 with offence/defence doubling keyed on who opened) are
//! empirically tuned and reproduced exactly; do not rebalance them.

use ndarray::Array2;

use crate::canonicalization;
use crate::error::GameError;
use crate::game_trait::{opponent, Game, GameState, Player, CROSS, NOUGHT};
use crate::games::{decisive_score, line_is_open_two, open_two_score, Cell};


const SIZE: usize = 3;

/// Placement move: `player` marks `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicTacToeMove {
    pub player: Player,
    pub row: usize,
    pub col: usize,
}

/// Immutable 3x3 board position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    grid: Array2<Cell>,
    last_player: Option<Player>,
    move_count: u32,
}

impl Position {
    /// The empty board; either player may make the first placement.
    pub fn start() -> Self {
        Position {
            grid: Array2::from_elem((SIZE, SIZE), Cell::Empty),
            last_player: None,
            move_count: 0,
        }
    }

    /// Parse a board from a whitespace-separated `X`/`O`/`.` rendering, e.g.
    /// `"X . .\n. O .\n. . ."`. `last_player` records whose mark went down
    /// most recently.
    pub fn parse(text: &str, last_player: Option<Player>) -> Result<Self, GameError> {
        let cells: Vec<Cell> = text
            .split_whitespace()
            .map(|token| match token {
                "X" => Ok(Cell::Taken(CROSS)),
                "O" => Ok(Cell::Taken(NOUGHT)),
                "." => Ok(Cell::Empty),
                _ => Err(GameError::IllegalMove),
            })
            .collect::<Result<_, _>>()?;
        if cells.len() != SIZE * SIZE {
            return Err(GameError::IllegalMove);
        }
        let move_count = cells
            .iter()
            .filter(|cell| matches!(cell, Cell::Taken(_)))
            .count() as u32;
        let grid = Array2::from_shape_fn((SIZE, SIZE), |(row, col)| cells[row * SIZE + col]);
        Ok(Position {
            grid,
            last_player,
            move_count,
        })
    }

    /// Checked cell access.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::OutOfWindow { row, col });
        }
        Ok(self.grid[[row, col]])
    }

    pub fn last_player(&self) -> Option<Player> {
        self.last_player
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// All legal placements for `player`.
    pub fn moves(&self, player: Player) -> Result<Vec<TicTacToeMove>, GameError> {
        if self.last_player == Some(player) {
            return Err(GameError::ConsecutiveMoves { player });
        }
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.grid[[row, col]] == Cell::Empty {
                    moves.push(TicTacToeMove { player, row, col });
                }
            }
        }
        Ok(moves)
    }

    /// Apply a placement, returning the successor position.
    pub fn place(&self, player: Player, row: usize, col: usize) -> Result<Self, GameError> {
        if self.last_player == Some(player) {
            return Err(GameError::ConsecutiveMoves { player });
        }
        if row >= SIZE || col >= SIZE {
            return Err(GameError::OutOfWindow { row, col });
        }
        if self.grid[[row, col]] != Cell::Empty {
            return Err(GameError::Occupied { row, col });
        }
        let mut grid = self.grid.clone();
        grid[[row, col]] = Cell::Taken(player);
        Ok(Position {
            grid,
            last_player: Some(player),
            move_count: self.move_count + 1,
        })
    }

    pub fn project_row(&self, row: usize) -> [Cell; 3] {
        [
            self.grid[[row, 0]],
            self.grid[[row, 1]],
            self.grid[[row, 2]],
        ]
    }

    pub fn project_col(&self, col: usize) -> [Cell; 3] {
        [
            self.grid[[0, col]],
            self.grid[[1, col]],
            self.grid[[2, col]],
        ]
    }

    /// `main = true` for the top-left-to-bottom-right diagonal.
    pub fn project_diag(&self, main: bool) -> [Cell; 3] {
        if main {
            [self.grid[[0, 0]], self.grid[[1, 1]], self.grid[[2, 2]]]
        } else {
            [self.grid[[0, 2]], self.grid[[1, 1]], self.grid[[2, 0]]]
        }
    }

    /// The winning player, if any line of three is complete.
    pub fn winner(&self) -> Option<Player> {
        let mut lines = Vec::with_capacity(8);
        for i in 0..SIZE {
            lines.push(self.project_row(i));
            lines.push(self.project_col(i));
        }
        lines.push(self.project_diag(true));
        lines.push(self.project_diag(false));

        for line in lines {
            if let Cell::Taken(player) = line[0] {
                if line[1] == line[0] && line[2] == line[0] {
                    return Some(player);
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.grid.iter().all(|cell| *cell != Cell::Empty)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// ASCII rendering, one row per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if col > 0 {
                    out.push(' ');
                }
                out.push(self.grid[[row, col]].to_char());
            }
            out.push('\n');
        }
        out
    }

    pub fn canonical_key(&self) -> String {
        canonicalization::canonical_key(&self.grid.view())
    }
}

/// The fixed-board game.
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;

    fn start(&self) -> TicTacToeState {
        TicTacToeState {
            position: Position::start(),
        }
    }

    fn opener(&self) -> Player {
        CROSS
    }
}

/// Engine-facing state wrapper around [`Position`].
#[derive(Clone, Debug)]
pub struct TicTacToeState {
    position: Position,
}

impl TicTacToeState {
    pub fn new(position: Position) -> Self {
        TicTacToeState { position }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn render(&self) -> String {
        self.position.render()
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn opener(&self) -> Player {
        CROSS
    }

    fn player(&self) -> Player {
        match self.position.last_player {
            Some(last) => opponent(last),
            None => CROSS,
        }
    }

    fn is_terminal(&self) -> bool {
        self.position.is_terminal()
    }

    fn winner(&self) -> Option<Player> {
        self.position.winner()
    }

    fn moves(&self, player: Player) -> Result<Vec<TicTacToeMove>, GameError> {
        self.position.moves(player)
    }

    fn next(&self, mv: &TicTacToeMove) -> Result<Self, GameError> {
        Ok(TicTacToeState {
            position: self.position.place(mv.player, mv.row, mv.col)?,
        })
    }

    fn canonical_key(&self) -> String {
        self.position.canonical_key()
    }

    fn evaluate(&self, perspective: Player, opponent_first: bool) -> i32 {
        let pos = &self.position;
        let rival = opponent(perspective);
        let mut score = 0;

        if let Some(winner) = pos.winner() {
            score += decisive_score(winner, perspective, opponent_first);
        }

        // Center and corner occupation.
        if pos.grid[[1, 1]] == Cell::Taken(perspective) {
            score += 10;
        }
        for &(row, col) in &[(0, 0), (0, 2), (2, 0), (2, 2)] {
            if pos.grid[[row, col]] == Cell::Taken(perspective) {
                score += 5;
            }
        }

        // Open twos: offence doubled when this side opened, defence doubled
        // when it moved second.
        let (own_weight, rival_weight) = if opponent_first { (1, 2) } else { (2, 1) };
        for i in 0..SIZE {
            score += own_weight * open_two_score(pos.project_row(i), perspective);
            score -= rival_weight * open_two_score(pos.project_row(i), rival);
            score += own_weight * open_two_score(pos.project_col(i), perspective);
            score -= rival_weight * open_two_score(pos.project_col(i), rival);
        }
        for main in [true, false] {
            score += own_weight * open_two_score(pos.project_diag(main), perspective);
            score -= rival_weight * open_two_score(pos.project_diag(main), rival);
        }

        score
    }

    fn open_two(&self, player: Player) -> bool {
        let pos = &self.position;
        for i in 0..SIZE {
            if line_is_open_two(pos.project_row(i), player)
                || line_is_open_two(pos.project_col(i), player)
            {
                return true;
            }
        }
        line_is_open_two(pos.project_diag(true), player)
            || line_is_open_two(pos.project_diag(false), player)
    }

    fn surge_threshold() -> Option<i32> {
        Some(40)
    }
}
