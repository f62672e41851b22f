//! # Monte Carlo Tree Search Implementation
//!
//! Single-threaded MCTS over [`SearchNode`] trees, generic over any
//! [`GameState`].
//!
//! ## Algorithm
//!
//! Standard MCTS phases, once per iteration:
//! 1. **Selection**: descend from the root by UCB1 until an unexpanded or
//!    terminal node is reached
//! 2. **Expansion**: add one child per legal move, skipping successors whose
//!    canonical key has already been expanded anywhere this run (symmetric
//!    duplicates share statistics through the first-expanded copy)
//! 3. **Simulation**: heuristic rollout from the selected node, scored as an
//!    evaluation delta
//! 4. **Backpropagation**: fold the result into every node on the selection
//!    path, root included
//!
//! The final answer is the root child with the highest raw win rate
//! (`score / playouts`), not the highest UCB1 value.
//!
//! ## Rollout Policy
//!
//! Moves are chosen by a four-stage priority: an immediately winning move,
//! else a move the opponent cannot answer with an immediate win, else a move
//! that blocks an existing opponent open-two, else uniformly at random.
//! Rollouts stop after [`ROLLOUT_DEPTH`] plies or at a terminal or
//! previously visited position.

use std::collections::HashSet;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use tracing::debug;

use crate::error::SearchError;
use crate::game_trait::{opponent, GameState, Player};
use crate::node::SearchNode;

/// Rollouts stop after this many plies.
const ROLLOUT_DEPTH: u32 = 5;

/// Evaluation bonus for a rollout that ends in a win for the searcher, or
/// whose evaluation gain crosses the game's surge threshold.
const DECISIVE_BONUS: i64 = 100;

/// UCB1 selection value.
///
/// Unvisited children are infinitely urgent. For visited children, the
/// exploitation term is the mean score and the exploration term uses the
/// standard `sqrt(2 ln N / n)` radius; the parent count is clamped to one so
/// the logarithm stays finite on a fresh root.
pub fn ucb1(score: i64, playouts: u32, parent_playouts: u32) -> f64 {
    if playouts == 0 {
        return f64::INFINITY;
    }
    let exploit = score as f64 / playouts as f64;
    let explore = (2.0 * (parent_playouts.max(1) as f64).ln() / playouts as f64).sqrt();
    exploit + explore
}

/// The search engine: owns the tree root, the RNG, and the run-wide set of
/// canonical keys already expanded.
pub struct SearchEngine<S: GameState> {
    root: SearchNode<S>,
    seen: HashSet<String>,
    rng: Pcg64Mcg,
    opponent_first: bool,
    searcher: Player,
}

impl<S: GameState> SearchEngine<S> {
    /// Build an engine around `root` with an OS-seeded RNG.
    ///
    /// `opponent_first` records whether the searcher's opponent made the
    /// game's first placement; it selects which side of the asymmetric
    /// evaluator weighting applies.
    pub fn new(root: SearchNode<S>, opponent_first: bool) -> Self {
        Self::with_rng(root, opponent_first, Pcg64Mcg::from_os_rng())
    }

    /// Build an engine with a fixed seed for reproducible searches.
    pub fn with_seed(root: SearchNode<S>, opponent_first: bool, seed: u64) -> Self {
        Self::with_rng(root, opponent_first, Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(root: SearchNode<S>, opponent_first: bool, rng: Pcg64Mcg) -> Self {
        let searcher = root.state().opener();
        SearchEngine {
            root,
            seen: HashSet::new(),
            rng,
            opponent_first,
            searcher,
        }
    }

    pub fn root(&self) -> &SearchNode<S> {
        &self.root
    }

    /// Run `iterations` search iterations and return the best root child.
    ///
    /// Best means highest win rate, ties broken toward the earliest-expanded
    /// child. Errors if the root position is terminal or expansion produced
    /// no children.
    pub fn run(&mut self, iterations: u32) -> Result<&SearchNode<S>, SearchError> {
        let start = Instant::now();
        self.seen.clear();
        self.seen.insert(self.root.state().canonical_key());

        for _ in 0..iterations {
            self.simulate()?;
        }

        let best = best_child_index(&self.root).ok_or(SearchError::NoChildren)?;
        let child = &self.root.children()[best];
        debug!(
            iterations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            root_playouts = self.root.playouts(),
            children = self.root.children().len(),
            best_score = child.score(),
            best_playouts = child.playouts(),
            "search finished"
        );
        Ok(child)
    }

    /// One full MCTS iteration: select, expand, roll out, back up.
    fn simulate(&mut self) -> Result<(), SearchError> {
        // Selection: record the child-index path down to a frontier node.
        let mut path = Vec::new();
        {
            let mut node = &self.root;
            while !node.is_leaf() && !node.children().is_empty() {
                let index = select_child(node)?;
                path.push(index);
                node = &node.children()[index];
            }
        }

        // Expansion.
        let frontier = node_at_mut(&mut self.root, &path);
        if !frontier.is_leaf() && frontier.children().is_empty() {
            expand(frontier, &mut self.seen)?;
            if let Some(index) = first_unvisited(frontier) {
                path.push(index);
            }
        }

        // Simulation from the selected node's state.
        let (terminal, state) = {
            let node = node_at(&self.root, &path);
            (node.is_leaf(), node.state().clone())
        };
        let score = if terminal {
            self.terminal_score(&state)
        } else {
            self.rollout(state)?
        };

        // Backpropagation: direct increment along the whole path.
        self.root.increment(score);
        let mut node = &mut self.root;
        for &index in &path {
            node = &mut node.children_mut()[index];
            node.increment(score);
        }
        Ok(())
    }

    fn terminal_score(&self, state: &S) -> i64 {
        let mut score = state.evaluate(self.searcher, self.opponent_first) as i64;
        if state.winner() == Some(self.searcher) {
            score += DECISIVE_BONUS;
        }
        score
    }

    /// Heuristic playout from `state`, alternating the move policy between
    /// the two players, scored as the evaluation gain over the rollout.
    fn rollout(&mut self, start: S) -> Result<i64, SearchError> {
        let start_eval = start.evaluate(self.searcher, self.opponent_first) as i64;
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(start.canonical_key());

        let mut state = start;
        let mut depth = 0;
        while depth < ROLLOUT_DEPTH && !state.is_terminal() {
            let player = state.player();
            let moves = state.moves(player)?;
            if moves.is_empty() {
                break;
            }
            let mut candidates = Vec::with_capacity(moves.len());
            for mv in &moves {
                let next = state.next(mv)?;
                if !visited.contains(&next.canonical_key()) {
                    candidates.push(next);
                }
            }
            if candidates.is_empty() {
                break;
            }
            let next = self.pick_move(&state, player, candidates)?;
            visited.insert(next.canonical_key());
            state = next;
            depth += 1;
        }

        let end_eval = state.evaluate(self.searcher, self.opponent_first) as i64;
        let mut score = end_eval - start_eval;
        let surged = S::surge_threshold().is_some_and(|threshold| score >= threshold as i64);
        if state.winner() == Some(self.searcher) || surged {
            score += DECISIVE_BONUS;
        }
        Ok(score)
    }

    /// Four-stage rollout move policy over precomputed successors.
    fn pick_move(
        &mut self,
        state: &S,
        player: Player,
        mut candidates: Vec<S>,
    ) -> Result<S, SearchError> {
        let rival = opponent(player);

        // Stage 1: take an immediate win.
        if let Some(index) = candidates
            .iter()
            .position(|next| next.winner() == Some(player))
        {
            return Ok(candidates.swap_remove(index));
        }

        // Stage 2: prefer a move the opponent cannot answer with a win.
        let mut safe = None;
        for (index, next) in candidates.iter().enumerate() {
            if next.is_terminal() {
                continue;
            }
            let mut opponent_wins = false;
            for reply in next.moves(rival)? {
                if next.next(&reply)?.winner() == Some(rival) {
                    opponent_wins = true;
                    break;
                }
            }
            if !opponent_wins {
                safe = Some(index);
                break;
            }
        }
        if let Some(index) = safe {
            return Ok(candidates.swap_remove(index));
        }

        // Stage 3: break an opponent open-two that already exists.
        if state.open_two(rival) {
            if let Some(index) = candidates.iter().position(|next| !next.open_two(rival)) {
                return Ok(candidates.swap_remove(index));
            }
        }

        // Stage 4: uniform random.
        let index = self.rng.random_range(0..candidates.len());
        Ok(candidates.swap_remove(index))
    }
}

/// Append one child per legal move whose canonical key is new this run.
fn expand<S: GameState>(
    node: &mut SearchNode<S>,
    seen: &mut HashSet<String>,
) -> Result<(), SearchError> {
    let state = node.state().clone();
    let player = state.player();
    for mv in state.moves(player)? {
        let next = state.next(&mv)?;
        if seen.insert(next.canonical_key()) {
            node.add_child(next);
        }
    }
    Ok(())
}

/// UCB1 selection: the first child attaining the maximal value.
fn select_child<S: GameState>(node: &SearchNode<S>) -> Result<usize, SearchError> {
    let parent_playouts = node.playouts();
    let mut best: Option<(usize, f64)> = None;
    for (index, child) in node.children().iter().enumerate() {
        let value = ucb1(child.score(), child.playouts(), parent_playouts);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index).ok_or(SearchError::NoChildren)
}

fn first_unvisited<S: GameState>(node: &SearchNode<S>) -> Option<usize> {
    node.children()
        .iter()
        .position(|child| child.playouts() == 0)
        .or(if node.children().is_empty() { None } else { Some(0) })
}

/// Root child with the highest win rate; first maximal index on ties.
fn best_child_index<S: GameState>(root: &SearchNode<S>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, child) in root.children().iter().enumerate() {
        let rate = child.win_rate();
        match best {
            Some((_, best_rate)) if rate <= best_rate => {}
            _ => best = Some((index, rate)),
        }
    }
    best.map(|(index, _)| index)
}

fn node_at<'a, S: GameState>(root: &'a SearchNode<S>, path: &[usize]) -> &'a SearchNode<S> {
    let mut node = root;
    for &index in path {
        node = &node.children()[index];
    }
    node
}

fn node_at_mut<'a, S: GameState>(
    root: &'a mut SearchNode<S>,
    path: &[usize],
) -> &'a mut SearchNode<S> {
    let mut node = root;
    for &index in path {
        node = &mut node.children_mut()[index];
    }
    node
}
