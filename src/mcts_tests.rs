#[cfg(test)]
mod tests {
    use crate::error::SearchError;
    use crate::game_trait::{GameState, CROSS, NOUGHT};
    use crate::games::tictactoe::{Position, TicTacToeState};
    use crate::mcts::{ucb1, SearchEngine};
    use crate::node::SearchNode;

    fn state(text: &str, last_player: Option<usize>) -> TicTacToeState {
        TicTacToeState::new(Position::parse(text, last_player).unwrap())
    }

    fn empty() -> TicTacToeState {
        state(". . .\n. . .\n. . .", None)
    }

    #[test]
    fn ucb1_prefers_unvisited_children_unconditionally() {
        assert_eq!(ucb1(0, 0, 100), f64::INFINITY);
        assert!(ucb1(0, 0, 100) > ucb1(1_000_000, 1, 100));
    }

    #[test]
    fn ucb1_matches_the_formula() {
        let expected = 3.0 / 5.0 + (2.0 * (20.0f64).ln() / 5.0).sqrt();
        assert!((ucb1(3, 5, 20) - expected).abs() < 1e-12);
    }

    #[test]
    fn ucb1_tolerates_a_fresh_parent() {
        // Parent count clamps to 1, so ln never sees zero.
        let value = ucb1(1, 1, 0);
        assert!(value.is_finite());
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn expansion_collapses_symmetric_openings() {
        // The empty board has three opening classes: corner, edge, center.
        let mut engine = SearchEngine::with_seed(SearchNode::new(empty()), false, 7);
        engine.run(1).unwrap();
        assert_eq!(engine.root().children().len(), 3);
    }

    #[test]
    fn single_iteration_visits_exactly_one_child() {
        let mut engine = SearchEngine::with_seed(SearchNode::new(empty()), false, 7);
        engine.run(1).unwrap();
        assert_eq!(engine.root().playouts(), 1);
        let visited: u32 = engine
            .root()
            .children()
            .iter()
            .map(|child| child.playouts())
            .sum();
        assert_eq!(visited, 1);
    }

    #[test]
    fn engine_takes_an_immediate_win() {
        // X to move, wins at (0, 2); anything else lets O finish (1, 2).
        let root = state("X X .\nO O .\n. . .", Some(NOUGHT));
        let mut engine = SearchEngine::with_seed(SearchNode::new(root), false, 42);
        let best = engine.run(200).unwrap();
        assert_eq!(best.state().winner(), Some(CROSS));
    }

    #[test]
    fn engine_blocks_an_opponent_threat() {
        // O holds (1, 1) and (2, 0) and threatens to finish at (0, 2).
        let root = state("X . .\n. O .\nO . .", Some(NOUGHT));
        let mut engine = SearchEngine::with_seed(SearchNode::new(root), false, 42);
        let best = engine.run(2_000).unwrap();
        assert_eq!(best.state().position().cell(0, 2).unwrap().to_char(), 'X');
    }

    #[test]
    fn best_child_is_chosen_by_win_rate_not_ucb() {
        let mut root = SearchNode::new(empty());
        root.add_child(state("X . .\n. . .\n. . .", Some(CROSS)));
        root.add_child(state(". X .\n. . .\n. . .", Some(CROSS)));

        // Child A: rate 0.5 over 2 playouts (huge exploration bonus),
        // child B: rate 0.7 over 100 playouts (tiny bonus).
        root.children_mut()[0].increment(1);
        root.children_mut()[0].increment(0);
        for i in 0..100 {
            root.children_mut()[1].increment(if i < 70 { 1 } else { 0 });
        }
        root.back_propagate();

        let mut engine = SearchEngine::with_seed(root, false, 1);
        let best = engine.run(0).unwrap();
        assert_eq!(
            best.state().position().cell(0, 1).unwrap().to_char(),
            'X',
            "the higher win rate must win even though A's UCB1 is larger"
        );
    }

    #[test]
    fn terminal_root_yields_no_children() {
        let root = state("X X X\nO O .\n. . .", Some(CROSS));
        let mut engine = SearchEngine::with_seed(SearchNode::new(root), false, 1);
        assert!(matches!(engine.run(10), Err(SearchError::NoChildren)));
    }

    #[test]
    fn seeded_searches_are_reproducible() {
        let run = |seed: u64| {
            let mut engine = SearchEngine::with_seed(SearchNode::new(empty()), false, seed);
            let best = engine.run(500).unwrap();
            (best.state().render(), best.score(), best.playouts())
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn statistics_flow_through_the_whole_path() {
        let mut engine = SearchEngine::with_seed(SearchNode::new(empty()), false, 3);
        engine.run(50).unwrap();
        assert_eq!(engine.root().playouts(), 50);
        let child_sum: u32 = engine
            .root()
            .children()
            .iter()
            .map(|child| child.playouts())
            .sum();
        // Every iteration past the first descends into some child.
        assert!(child_sum >= 49);
    }
}
