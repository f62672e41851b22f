//! Search tree node: one owned game state, owned children, and the
//! (score, playouts) statistics the selection formula feeds on.

use crate::game_trait::GameState;

/// A node in the search tree.
///
/// Children are appended only during expansion and never removed; insertion
/// order is meaningful solely for deterministic tie-breaking. Statistics are
/// updated either by [`SearchNode::increment`] (direct accumulation of a
/// simulation result) or recomputed wholesale by
/// [`SearchNode::back_propagate`] (child-sum aggregation) - the engine uses
/// the direct discipline uniformly.
pub struct SearchNode<S: GameState> {
    state: S,
    children: Vec<SearchNode<S>>,
    score: i64,
    playouts: u32,
}

impl<S: GameState> SearchNode<S> {
    /// Wrap a state in a fresh node.
    ///
    /// Terminal states carry their result from birth rather than waiting for
    /// a rollout: a decisive terminal starts at `(playouts, score) = (1, 2)`,
    /// a drawn terminal at `(1, 1)`, and everything else at `(0, 0)`.
    pub fn new(state: S) -> Self {
        let (playouts, score) = if state.is_terminal() {
            if state.winner().is_some() {
                (1, 2)
            } else {
                (1, 1)
            }
        } else {
            (0, 0)
        };
        SearchNode {
            state,
            children: Vec::new(),
            score,
            playouts,
        }
    }

    /// True iff the wrapped state is terminal.
    pub fn is_leaf(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn children(&self) -> &[SearchNode<S>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [SearchNode<S>] {
        &mut self.children
    }

    /// Construct and append a child node wrapping `state`.
    pub fn add_child(&mut self, state: S) {
        self.children.push(SearchNode::new(state));
    }

    /// Fold one simulation result into this node: `playouts += 1`,
    /// `score += score_delta`.
    pub fn increment(&mut self, score_delta: i64) {
        self.playouts += 1;
        self.score += score_delta;
    }

    /// Recompute this node's statistics as the sum over its children.
    ///
    /// Always a full recompute, never an incremental drift: after the call,
    /// `score` and `playouts` equal the child sums exactly.
    pub fn back_propagate(&mut self) {
        let mut score = 0;
        let mut playouts = 0;
        for child in &self.children {
            score += child.score;
            playouts += child.playouts;
        }
        self.score = score;
        self.playouts = playouts;
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn playouts(&self) -> u32 {
        self.playouts
    }

    /// Exploitation ratio `score / playouts`; negative infinity for an
    /// unvisited node so it can never win the final move choice.
    pub fn win_rate(&self) -> f64 {
        if self.playouts == 0 {
            f64::NEG_INFINITY
        } else {
            self.score as f64 / self.playouts as f64
        }
    }
}
