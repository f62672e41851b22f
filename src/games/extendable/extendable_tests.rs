#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use crate::error::GameError;
    use crate::game_trait::{GameState, CROSS, NOUGHT};
    use crate::games::extendable::{
        Direction, ExtendableMove, ExtendablePosition, ExtendableState, MAX,
    };
    use crate::games::Cell;

    fn place(player: usize, row: usize, col: usize) -> ExtendableMove {
        ExtendableMove::Place { player, row, col }
    }

    #[test]
    fn start_window_is_the_centered_three_by_three() {
        let start = ExtendablePosition::start();
        assert_eq!((start.row_min(), start.col_min()), (3, 3));
        assert_eq!(start.window_size(), (3, 3));
        assert_eq!(start.cell(4, 4).unwrap(), Cell::Empty);
        assert!(matches!(
            start.cell(2, 4),
            Err(GameError::OutOfWindow { row: 2, col: 4 })
        ));
    }

    #[test]
    fn opening_offers_nine_placements_and_eight_extensions() {
        let moves = ExtendablePosition::start().moves(CROSS).unwrap();
        assert_eq!(moves.len(), 17);
        let places = moves
            .iter()
            .filter(|mv| matches!(mv, ExtendableMove::Place { .. }))
            .count();
        assert_eq!(places, 9);
    }

    #[test]
    fn extension_reveals_a_full_band() {
        let start = ExtendablePosition::start();
        let extended = start
            .next(&ExtendableMove::Extend {
                player: CROSS,
                direction: Direction::N,
            })
            .unwrap();
        assert_eq!((extended.row_min(), extended.col_min()), (0, 3));
        assert_eq!(extended.window_size(), (6, 3));
        // Revealed cells are playable, old cells untouched.
        assert_eq!(extended.cell(0, 3).unwrap(), Cell::Empty);
        assert_eq!(extended.cell(4, 4).unwrap(), Cell::Empty);
        assert_eq!(extended.move_count(), 1);
        assert_eq!(extended.last_player(), Some(CROSS));
    }

    #[test]
    fn diagonal_extension_grows_both_axes() {
        let extended = ExtendablePosition::start()
            .next(&ExtendableMove::Extend {
                player: CROSS,
                direction: Direction::SE,
            })
            .unwrap();
        assert_eq!((extended.row_min(), extended.col_min()), (3, 3));
        assert_eq!(extended.window_size(), (6, 6));
        assert_eq!(extended.cell(8, 8).unwrap(), Cell::Empty);
    }

    #[test]
    fn extension_stops_at_the_super_grid_boundary() {
        let once = ExtendablePosition::start()
            .next(&ExtendableMove::Extend {
                player: CROSS,
                direction: Direction::N,
            })
            .unwrap();
        assert!(!once.can_extend(Direction::N));
        assert!(!once.can_extend(Direction::NE));
        assert!(!once.can_extend(Direction::NW));
        assert!(once.can_extend(Direction::S));
        assert!(matches!(
            once.next(&ExtendableMove::Extend {
                player: NOUGHT,
                direction: Direction::N,
            }),
            Err(GameError::ExtensionBlocked {
                direction: Direction::N
            })
        ));
    }

    #[test]
    fn winner_is_found_in_revealed_territory() {
        let mut grid = Array2::from_elem((MAX, MAX), Cell::Unavailable);
        for row in 0..6 {
            for col in 3..6 {
                grid[[row, col]] = Cell::Empty;
            }
        }
        // Vertical X run straddling the original window boundary.
        grid[[2, 4]] = Cell::Taken(CROSS);
        grid[[3, 4]] = Cell::Taken(CROSS);
        grid[[4, 4]] = Cell::Taken(CROSS);
        grid[[3, 3]] = Cell::Taken(NOUGHT);
        grid[[4, 3]] = Cell::Taken(NOUGHT);
        let position = ExtendablePosition::from_parts(grid, Some(CROSS), 6, 0, 6, 3, 6);
        assert_eq!(position.winner(), Some(CROSS));
        assert!(position.is_terminal());
    }

    #[test]
    fn anti_diagonal_runs_count() {
        let mut grid = Array2::from_elem((MAX, MAX), Cell::Unavailable);
        for row in 3..6 {
            for col in 3..6 {
                grid[[row, col]] = Cell::Empty;
            }
        }
        grid[[3, 5]] = Cell::Taken(NOUGHT);
        grid[[4, 4]] = Cell::Taken(NOUGHT);
        grid[[5, 3]] = Cell::Taken(NOUGHT);
        grid[[3, 3]] = Cell::Taken(CROSS);
        grid[[3, 4]] = Cell::Taken(CROSS);
        let position = ExtendablePosition::from_parts(grid, Some(NOUGHT), 5, 3, 6, 3, 6);
        assert_eq!(position.winner(), Some(NOUGHT));
    }

    #[test]
    fn placements_respect_turn_order_and_occupancy() {
        let start = ExtendablePosition::start();
        let after = start.next(&place(CROSS, 4, 4)).unwrap();
        assert!(matches!(
            after.next(&place(CROSS, 3, 3)),
            Err(GameError::ConsecutiveMoves { player: CROSS })
        ));
        assert!(matches!(
            after.next(&place(NOUGHT, 4, 4)),
            Err(GameError::Occupied { row: 4, col: 4 })
        ));
    }

    #[test]
    fn canonical_key_sees_only_the_window() {
        let start = ExtendableState::new(ExtendablePosition::start());
        // A bare 3x3 window keys identically wherever it sits; growing the
        // window changes the key because the shape changes.
        assert_eq!(start.canonical_key(), "...|...|...|");
        let extended = start
            .next(&ExtendableMove::Extend {
                player: CROSS,
                direction: Direction::E,
            })
            .unwrap();
        assert_eq!(extended.position().window_size(), (3, 6));
        assert_ne!(extended.canonical_key(), start.canonical_key());
    }

    #[test]
    fn symmetric_extensions_share_a_canonical_key() {
        let start = ExtendableState::new(ExtendablePosition::start());
        let north = start
            .next(&ExtendableMove::Extend {
                player: CROSS,
                direction: Direction::N,
            })
            .unwrap();
        let east = start
            .next(&ExtendableMove::Extend {
                player: CROSS,
                direction: Direction::E,
            })
            .unwrap();
        assert_eq!(north.canonical_key(), east.canonical_key());
    }

    #[test]
    fn evaluate_penalizes_move_count() {
        let quick = ExtendableState::new(
            ExtendablePosition::start()
                .next(&place(CROSS, 4, 4))
                .unwrap(),
        );
        let slow = ExtendableState::new(
            ExtendablePosition::start()
                .next(&ExtendableMove::Extend {
                    player: NOUGHT,
                    direction: Direction::N,
                })
                .unwrap()
                .next(&ExtendableMove::Extend {
                    player: CROSS,
                    direction: Direction::S,
                })
                .unwrap()
                .next(&place(NOUGHT, 0, 3))
                .unwrap()
                .next(&place(CROSS, 4, 4))
                .unwrap(),
        );
        // Same single X mark, three extra plies spent: 2 points each.
        assert_eq!(
            quick.evaluate(CROSS, false) - slow.evaluate(CROSS, false),
            6
        );
    }

    #[test]
    fn evaluate_counts_open_twos_across_the_window() {
        let mut grid = Array2::from_elem((MAX, MAX), Cell::Unavailable);
        for row in 3..6 {
            for col in 3..6 {
                grid[[row, col]] = Cell::Empty;
            }
        }
        grid[[3, 3]] = Cell::Taken(CROSS);
        grid[[3, 4]] = Cell::Taken(CROSS);
        let position = ExtendablePosition::from_parts(grid, Some(CROSS), 2, 3, 6, 3, 6);
        let state = ExtendableState::new(position);
        // One open two, offence doubled, minus the move-count penalty.
        assert_eq!(state.evaluate(CROSS, false), 2 * 20 - 2 * 2);
        assert!(state.open_two(CROSS));
        assert!(!state.open_two(NOUGHT));
    }

    #[test]
    fn no_surge_threshold_for_the_extendable_board() {
        assert_eq!(ExtendableState::surge_threshold(), None);
    }

    #[test]
    fn draw_requires_full_window_and_blocked_growth() {
        let mut grid = Array2::from_elem((MAX, MAX), Cell::Empty);
        // Paired tiling shifted two cells per row: no run of three in any
        // direction.
        for row in 0..MAX {
            for col in 0..MAX {
                let mark = if (col + 2 * row) % 4 < 2 { CROSS } else { NOUGHT };
                grid[[row, col]] = Cell::Taken(mark);
            }
        }
        let position =
            ExtendablePosition::from_parts(grid, Some(CROSS), 81, 0, MAX, 0, MAX);
        assert_eq!(position.winner(), None);
        assert!(position.is_terminal());

        // A full window that can still grow is not terminal.
        let mut small = Array2::from_elem((MAX, MAX), Cell::Unavailable);
        for row in 3..6 {
            for col in 3..6 {
                let mark = if (col + 2 * row) % 4 < 2 { CROSS } else { NOUGHT };
                small[[row, col]] = Cell::Taken(mark);
            }
        }
        let growable = ExtendablePosition::from_parts(small, Some(CROSS), 9, 3, 6, 3, 6);
        assert_eq!(growable.winner(), None);
        assert!(!growable.is_terminal());
    }
}
