pub mod board;
pub mod constants;
pub mod errors;
pub mod game;
pub mod history;
pub mod move_gen;
pub mod r#move;

#[cfg(test)]
mod tests {
    use super::board::{Board, Square};
    use super::constants::Color;
    use super::game::{ClickOutcome, Game, Outcome};
    use super::history::Direction;
    use super::move_gen;

    #[test]
    fn opening_king_has_exactly_the_unblocked_neighbors() {
        let mut game = Game::new();
        assert_eq!(game.click(Square::new(4, 8)), ClickOutcome::Selected);
        let mut destinations = game.legal_destinations().to_vec();
        destinations.sort_by_key(|square| square.index());
        // Every other neighbor is off the board or holds a white piece.
        assert_eq!(destinations, vec![Square::new(3, 7), Square::new(5, 7)]);
    }

    #[test]
    fn opening_lion_slides_two_squares_at_most() {
        let mut game = Game::new();
        assert_eq!(game.click(Square::new(2, 7)), ClickOutcome::Selected);
        let mut destinations = game.legal_destinations().to_vec();
        destinations.sort_by_key(|square| square.index());
        let mut expected = vec![
            Square::new(2, 5),
            Square::new(2, 6),
            Square::new(0, 7),
            Square::new(1, 7),
            Square::new(3, 7),
        ];
        expected.sort_by_key(|square| square.index());
        assert_eq!(destinations, expected);
    }

    #[test]
    fn legal_moves_never_leave_the_mover_in_check() {
        let board = Board::initial();
        for (from, piece) in board.pieces() {
            if piece.color != Color::White {
                continue;
            }
            for to in move_gen::legal_moves(&board, from, Color::White) {
                let mut applied = board.clone();
                applied.set(to, Some(piece));
                applied.set(from, None);
                assert!(
                    !move_gen::is_in_check(&applied, Color::White),
                    "{from} -> {to} exposes the king",
                );
            }
        }
    }

    #[test]
    fn checkmate_is_detected_with_the_right_winner() {
        // White sage steps to B8, covering every flight square of the
        // cornered black king while the white king guards the sage.
        let mut game = Game::from_layout("k8/2S6/2K6/9/9/9/9/9/9 w").unwrap();
        assert_eq!(game.click(Square::new(2, 1)), ClickOutcome::Selected);
        assert_eq!(
            game.click(Square::new(1, 1)),
            ClickOutcome::Moved(Some(Outcome::Checkmate {
                winner: Color::White
            })),
        );
        assert_eq!(
            game.outcome(),
            Some(Outcome::Checkmate {
                winner: Color::White
            }),
        );

        // Terminal states are latched: everything is inert afterwards.
        assert_eq!(game.click(Square::new(0, 0)), ClickOutcome::Ignored);
        assert_eq!(game.click(Square::new(2, 2)), ClickOutcome::Ignored);
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        // After the sage reaches B7 the black king has no move but is not
        // attacked.
        let mut game = Game::from_layout("k8/2S6/9/1S7/9/9/9/9/8K w").unwrap();
        assert_eq!(game.click(Square::new(1, 3)), ClickOutcome::Selected);
        assert_eq!(
            game.click(Square::new(1, 2)),
            ClickOutcome::Moved(Some(Outcome::Stalemate)),
        );
        assert!(!move_gen::is_in_check(game.board(), Color::Black));
        assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn history_round_trips_across_navigation() {
        let mut game = Game::new();
        let start = game.board().clone();

        game.click(Square::new(2, 7));
        game.click(Square::new(2, 5));
        let after_first = game.board().clone();
        game.click(Square::new(2, 1));
        game.click(Square::new(2, 3));
        game.click(Square::new(4, 6));
        game.click(Square::new(4, 5));
        let after_third = game.board().clone();
        assert_eq!(game.moves().len(), 3);

        assert!(game.navigate(Direction::Back));
        assert!(game.navigate(Direction::Back));
        assert_eq!(game.board(), &after_first);
        assert_eq!(game.turn(), Color::Black);
        assert!(game.browsing());

        assert!(game.navigate(Direction::Back));
        assert_eq!(game.board(), &start);
        assert_eq!(game.turn(), Color::White);
        assert!(!game.navigate(Direction::Back));

        for _ in 0..3 {
            assert!(game.navigate(Direction::Forward));
        }
        assert_eq!(game.board(), &after_third);
        assert_eq!(game.turn(), Color::Black);
        assert!(!game.browsing());
        assert!(!game.navigate(Direction::Forward));

        // Navigation never touches the log.
        assert_eq!(game.moves().len(), 3);
    }

    #[test]
    fn browsing_rejects_move_input() {
        let mut game = Game::new();
        game.click(Square::new(2, 7));
        game.click(Square::new(2, 5));
        assert!(game.navigate(Direction::Back));

        assert_eq!(game.click(Square::new(2, 7)), ClickOutcome::Ignored);
        assert_eq!(game.selected(), None);

        // Back at the tip, input is live again.
        assert!(game.navigate(Direction::Forward));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.click(Square::new(2, 1)), ClickOutcome::Selected);
    }
}
