//! # Extendable Tic-Tac-Toe
//!
//! The growable variant: play starts in a 3x3 window centered in a bounded
//! 9x9 super-grid. Instead of placing a mark, a player may spend their turn
//! extending the window by one 3-cell band in any of eight compass
//! directions, converting the newly revealed cells from unavailable to
//! empty. Three in a row anywhere inside the window wins.
//!
//! ## State Representation
//! - 9x9 grid of [`Cell`]s; cells outside the window are `Unavailable`
//! - window bounds (`row_min..row_max`, `col_min..col_max`)
//! - last mover and a move counter
//!
//! ## Moves
//! - `Place { player, row, col }` in super-grid coordinates
//! - `Extend { player, direction }`

use ndarray::{s, Array2};

use crate::canonicalization;
use crate::error::GameError;
use crate::game_trait::{opponent, Game, GameState, Player, CROSS};
use crate::games::{decisive_score, line_is_open_two, open_two_score, Cell};

#[cfg(test)]
mod extendable_tests;

/// Super-grid edge length; the window can never grow past this.
pub const MAX: usize = 9;

/// Band width revealed by one extension (also the window's starting size).
const BAND: usize = 3;

/// Compass direction of a window extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn has_north(self) -> bool {
        matches!(self, Direction::N | Direction::NE | Direction::NW)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Direction::S | Direction::SE | Direction::SW)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Direction::E | Direction::NE | Direction::SE)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Direction::W | Direction::NW | Direction::SW)
    }
}

/// Move in the extendable variant: a placement or a window extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtendableMove {
    Place {
        player: Player,
        row: usize,
        col: usize,
    },
    Extend {
        player: Player,
        direction: Direction,
    },
}

/// Immutable super-grid position with its active window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendablePosition {
    grid: Array2<Cell>,
    row_min: usize,
    row_max: usize,
    col_min: usize,
    col_max: usize,
    last_player: Option<Player>,
    move_count: u32,
}

impl ExtendablePosition {
    /// Center 3x3 window empty, everything else unavailable.
    pub fn start() -> Self {
        let mut grid = Array2::from_elem((MAX, MAX), Cell::Unavailable);
        for row in BAND..2 * BAND {
            for col in BAND..2 * BAND {
                grid[[row, col]] = Cell::Empty;
            }
        }
        ExtendablePosition {
            grid,
            row_min: BAND,
            row_max: 2 * BAND,
            col_min: BAND,
            col_max: 2 * BAND,
            last_player: None,
            move_count: 0,
        }
    }

    /// Assemble a position from raw parts. Used by tests that need crafted
    /// windows; no consistency checking beyond the bounds.
    pub(crate) fn from_parts(
        grid: Array2<Cell>,
        last_player: Option<Player>,
        move_count: u32,
        row_min: usize,
        row_max: usize,
        col_min: usize,
        col_max: usize,
    ) -> Self {
        debug_assert!(row_max <= MAX && col_max <= MAX);
        ExtendablePosition {
            grid,
            row_min,
            row_max,
            col_min,
            col_max,
            last_player,
            move_count,
        }
    }

    pub fn row_min(&self) -> usize {
        self.row_min
    }

    pub fn col_min(&self) -> usize {
        self.col_min
    }

    /// `(height, width)` of the active window.
    pub fn window_size(&self) -> (usize, usize) {
        (self.row_max - self.row_min, self.col_max - self.col_min)
    }

    pub fn last_player(&self) -> Option<Player> {
        self.last_player
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Checked cell access; only cells inside the window are addressable.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GameError> {
        if row < self.row_min || row >= self.row_max || col < self.col_min || col >= self.col_max {
            return Err(GameError::OutOfWindow { row, col });
        }
        Ok(self.grid[[row, col]])
    }

    /// Whether one more band fits between the window and the super-grid
    /// boundary in `direction`.
    pub fn can_extend(&self, direction: Direction) -> bool {
        if direction.has_north() && self.row_min < BAND {
            return false;
        }
        if direction.has_south() && self.row_max + BAND > MAX {
            return false;
        }
        if direction.has_west() && self.col_min < BAND {
            return false;
        }
        if direction.has_east() && self.col_max + BAND > MAX {
            return false;
        }
        true
    }

    /// All legal moves for `player`: placements into empty window cells,
    /// then extensions in every direction that stays within the super-grid.
    pub fn moves(&self, player: Player) -> Result<Vec<ExtendableMove>, GameError> {
        if self.last_player == Some(player) {
            return Err(GameError::ConsecutiveMoves { player });
        }
        let mut moves = Vec::new();
        for row in self.row_min..self.row_max {
            for col in self.col_min..self.col_max {
                if self.grid[[row, col]] == Cell::Empty {
                    moves.push(ExtendableMove::Place { player, row, col });
                }
            }
        }
        for direction in Direction::ALL {
            if self.can_extend(direction) {
                moves.push(ExtendableMove::Extend { player, direction });
            }
        }
        Ok(moves)
    }

    /// Apply a placement or an extension, returning the successor.
    pub fn next(&self, mv: &ExtendableMove) -> Result<Self, GameError> {
        match *mv {
            ExtendableMove::Place { player, row, col } => self.place(player, row, col),
            ExtendableMove::Extend { player, direction } => self.extend(player, direction),
        }
    }

    fn place(&self, player: Player, row: usize, col: usize) -> Result<Self, GameError> {
        if self.last_player == Some(player) {
            return Err(GameError::ConsecutiveMoves { player });
        }
        match self.cell(row, col)? {
            Cell::Empty => {}
            _ => return Err(GameError::Occupied { row, col }),
        }
        let mut grid = self.grid.clone();
        grid[[row, col]] = Cell::Taken(player);
        Ok(ExtendablePosition {
            grid,
            last_player: Some(player),
            move_count: self.move_count + 1,
            ..*self
        })
    }

    fn extend(&self, player: Player, direction: Direction) -> Result<Self, GameError> {
        if self.last_player == Some(player) {
            return Err(GameError::ConsecutiveMoves { player });
        }
        if !self.can_extend(direction) {
            return Err(GameError::ExtensionBlocked { direction });
        }
        let row_min = self.row_min - if direction.has_north() { BAND } else { 0 };
        let row_max = self.row_max + if direction.has_south() { BAND } else { 0 };
        let col_min = self.col_min - if direction.has_west() { BAND } else { 0 };
        let col_max = self.col_max + if direction.has_east() { BAND } else { 0 };

        let mut grid = self.grid.clone();
        // Newly revealed cells become playable.
        for row in row_min..row_max {
            for col in col_min..col_max {
                if row < self.row_min
                    || row >= self.row_max
                    || col < self.col_min
                    || col >= self.col_max
                {
                    grid[[row, col]] = Cell::Empty;
                }
            }
        }
        Ok(ExtendablePosition {
            grid,
            row_min,
            row_max,
            col_min,
            col_max,
            last_player: Some(player),
            move_count: self.move_count + 1,
        })
    }

    /// Scan every 3-cell run inside the window for a completed line.
    pub fn winner(&self) -> Option<Player> {
        let owner = |cell: Cell| match cell {
            Cell::Taken(player) => Some(player),
            _ => None,
        };

        // Horizontal runs.
        for row in self.row_min..self.row_max {
            for col in self.col_min..self.col_max.saturating_sub(2) {
                let a = self.grid[[row, col]];
                if owner(a).is_some()
                    && self.grid[[row, col + 1]] == a
                    && self.grid[[row, col + 2]] == a
                {
                    return owner(a);
                }
            }
        }
        // Vertical runs.
        for col in self.col_min..self.col_max {
            for row in self.row_min..self.row_max.saturating_sub(2) {
                let a = self.grid[[row, col]];
                if owner(a).is_some()
                    && self.grid[[row + 1, col]] == a
                    && self.grid[[row + 2, col]] == a
                {
                    return owner(a);
                }
            }
        }
        // Down-right diagonals.
        for row in self.row_min..self.row_max.saturating_sub(2) {
            for col in self.col_min..self.col_max.saturating_sub(2) {
                let a = self.grid[[row, col]];
                if owner(a).is_some()
                    && self.grid[[row + 1, col + 1]] == a
                    && self.grid[[row + 2, col + 2]] == a
                {
                    return owner(a);
                }
            }
        }
        // Down-left diagonals.
        for row in self.row_min..self.row_max.saturating_sub(2) {
            for col in (self.col_min + 2)..self.col_max {
                let a = self.grid[[row, col]];
                if owner(a).is_some()
                    && self.grid[[row + 1, col - 1]] == a
                    && self.grid[[row + 2, col - 2]] == a
                {
                    return owner(a);
                }
            }
        }
        None
    }

    fn window_full(&self) -> bool {
        for row in self.row_min..self.row_max {
            for col in self.col_min..self.col_max {
                if self.grid[[row, col]] == Cell::Empty {
                    return false;
                }
            }
        }
        true
    }

    fn extensions_blocked(&self) -> bool {
        Direction::ALL.iter().all(|&d| !self.can_extend(d))
    }

    /// Terminal when someone has won, or nothing can be placed and the
    /// window cannot grow any further (a draw).
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || (self.window_full() && self.extensions_blocked())
    }

    /// ASCII rendering of the active window only.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in self.row_min..self.row_max {
            for col in self.col_min..self.col_max {
                if col > self.col_min {
                    out.push(' ');
                }
                out.push(self.grid[[row, col]].to_char());
            }
            out.push('\n');
        }
        out
    }

    /// Canonical key over the active window (window shape included).
    pub fn canonical_key(&self) -> String {
        let window = self
            .grid
            .slice(s![self.row_min..self.row_max, self.col_min..self.col_max]);
        canonicalization::canonical_key(&window)
    }

    /// Every 3-cell line segment (all four directions) inside the window.
    fn line_segments(&self) -> Vec<[Cell; 3]> {
        let mut lines = Vec::new();
        for row in self.row_min..self.row_max {
            for col in self.col_min..self.col_max.saturating_sub(2) {
                lines.push([
                    self.grid[[row, col]],
                    self.grid[[row, col + 1]],
                    self.grid[[row, col + 2]],
                ]);
            }
        }
        for col in self.col_min..self.col_max {
            for row in self.row_min..self.row_max.saturating_sub(2) {
                lines.push([
                    self.grid[[row, col]],
                    self.grid[[row + 1, col]],
                    self.grid[[row + 2, col]],
                ]);
            }
        }
        for row in self.row_min..self.row_max.saturating_sub(2) {
            for col in self.col_min..self.col_max.saturating_sub(2) {
                lines.push([
                    self.grid[[row, col]],
                    self.grid[[row + 1, col + 1]],
                    self.grid[[row + 2, col + 2]],
                ]);
            }
        }
        for row in self.row_min..self.row_max.saturating_sub(2) {
            for col in (self.col_min + 2)..self.col_max {
                lines.push([
                    self.grid[[row, col]],
                    self.grid[[row + 1, col - 1]],
                    self.grid[[row + 2, col - 2]],
                ]);
            }
        }
        lines
    }
}

/// The extendable game.
pub struct ExtendableTicTacToe;

impl Game for ExtendableTicTacToe {
    type State = ExtendableState;

    fn start(&self) -> ExtendableState {
        ExtendableState {
            position: ExtendablePosition::start(),
        }
    }

    fn opener(&self) -> Player {
        CROSS
    }
}

/// Engine-facing state wrapper around [`ExtendablePosition`].
#[derive(Clone, Debug)]
pub struct ExtendableState {
    position: ExtendablePosition,
}

impl ExtendableState {
    pub fn new(position: ExtendablePosition) -> Self {
        ExtendableState { position }
    }

    pub fn position(&self) -> &ExtendablePosition {
        &self.position
    }

    pub fn render(&self) -> String {
        self.position.render()
    }
}

impl GameState for ExtendableState {
    type Move = ExtendableMove;

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

    fn moves(&self, player: Player) -> Result<Vec<ExtendableMove>, GameError> {
        self.position.moves(player)
    }

    fn next(&self, mv: &ExtendableMove) -> Result<Self, GameError> {
        Ok(ExtendableState {
            position: self.position.next(mv)?,
        })
    }

    fn canonical_key(&self) -> String {
        self.position.canonical_key()
    }

    fn evaluate(&self, perspective: Player, opponent_first: bool) -> i32 {
        let rival = opponent(perspective);
        let mut score = 0;

        if let Some(winner) = self.position.winner() {
            score += decisive_score(winner, perspective, opponent_first);
        }

        let (own_weight, rival_weight) = if opponent_first { (1, 2) } else { (2, 1) };
        for line in self.position.line_segments() {
            score += own_weight * open_two_score(line, perspective);
            score -= rival_weight * open_two_score(line, rival);
        }

        // Move-count penalty keeps rollouts from padding the window with
        // growth moves that make no board progress.
        score -= 2 * self.position.move_count as i32;

        score
    }

    fn open_two(&self, player: Player) -> bool {
        self.position
            .line_segments()
            .into_iter()
            .any(|line| line_is_open_two(line, player))
    }
}
