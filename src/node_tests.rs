#[cfg(test)]
mod tests {
    use crate::game_trait::{GameState, CROSS, NOUGHT};
    use crate::games::tictactoe::{Position, TicTacToeState};
    use crate::node::SearchNode;

    fn state(text: &str, last_player: Option<usize>) -> TicTacToeState {
        TicTacToeState::new(Position::parse(text, last_player).unwrap())
    }

    #[test]
    fn fresh_node_starts_unvisited() {
        let node = SearchNode::new(state(". . .\n. . .\n. . .", None));
        assert_eq!(node.playouts(), 0);
        assert_eq!(node.score(), 0);
        assert!(!node.is_leaf());
        assert!(node.children().is_empty());
    }

    #[test]
    fn decisive_terminal_node_carries_its_result() {
        let node = SearchNode::new(state("X X X\nO O .\n. . .", Some(CROSS)));
        assert!(node.is_leaf());
        assert_eq!(node.playouts(), 1);
        assert_eq!(node.score(), 2);
    }

    #[test]
    fn drawn_terminal_node_scores_one() {
        let node = SearchNode::new(state("X O X\nX O O\nO X X", Some(CROSS)));
        assert!(node.is_leaf());
        assert_eq!(node.state().winner(), None);
        assert_eq!(node.playouts(), 1);
        assert_eq!(node.score(), 1);
    }

    #[test]
    fn increment_accumulates_directly() {
        let mut node = SearchNode::new(state(". . .\n. . .\n. . .", None));
        node.increment(3);
        node.increment(-1);
        assert_eq!(node.playouts(), 2);
        assert_eq!(node.score(), 2);
    }

    #[test]
    fn back_propagate_recomputes_from_children() {
        let empty = state(". . .\n. . .\n. . .", None);
        let mut node = SearchNode::new(empty.clone());
        node.increment(99); // stale parent stats, wiped by the recompute

        node.add_child(state("X . .\n. . .\n. . .", Some(CROSS)));
        node.add_child(state(". X .\n. . .\n. . .", Some(CROSS)));
        node.children_mut()[0].increment(3);
        node.children_mut()[1].increment(2);

        node.back_propagate();
        assert_eq!(node.score(), 5);
        assert_eq!(node.playouts(), 2);
    }

    #[test]
    fn win_rate_of_unvisited_node_never_wins_a_comparison() {
        let node = SearchNode::new(state(". . .\n. . .\n. . .", None));
        assert_eq!(node.win_rate(), f64::NEG_INFINITY);

        let mut visited = SearchNode::new(state("O . .\n. . .\n. . .", Some(NOUGHT)));
        visited.increment(-7);
        assert!(visited.win_rate() > node.win_rate());
    }

    #[test]
    fn win_rate_is_score_over_playouts() {
        let mut node = SearchNode::new(state(". . .\n. . .\n. . .", None));
        node.increment(2);
        node.increment(2);
        node.increment(2);
        node.increment(-1);
        assert!((node.win_rate() - 1.25).abs() < 1e-9);
    }
}
