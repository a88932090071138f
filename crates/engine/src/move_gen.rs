//! Move generation and check detection, including pre-computed step tables.

use crate::board::{Board, Square, SQUARE_COUNT};
use crate::constants::{Color, Piece, PieceKind};
use once_cell::sync::Lazy;

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const FOX_STEPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

const LION_DIRS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const LION_RANGE: i8 = 2;

/// Per-square destination tables, bounds-checked once at startup and then
/// accessed globally.
pub struct StepTables {
    /// Shared by the king and the sage: the up-to-8 adjacent squares.
    king: [Vec<Square>; SQUARE_COUNT],
    fox: [Vec<Square>; SQUARE_COUNT],
    /// One ray per orthogonal direction, at most two squares long, nearest
    /// square first.
    lion_rays: [[Vec<Square>; 4]; SQUARE_COUNT],
}

impl StepTables {
    fn new() -> StepTables {
        let king = std::array::from_fn(|index| {
            let from = Square::from_index(index);
            KING_STEPS
                .iter()
                .filter_map(|&(df, dr)| from.offset(df, dr))
                .collect()
        });
        let fox = std::array::from_fn(|index| {
            let from = Square::from_index(index);
            FOX_STEPS
                .iter()
                .filter_map(|&(df, dr)| from.offset(df, dr))
                .collect()
        });
        let lion_rays = std::array::from_fn(|index| {
            let from = Square::from_index(index);
            LION_DIRS.map(|(df, dr)| {
                (1..=LION_RANGE)
                    .map_while(|step| from.offset(df * step, dr * step))
                    .collect()
            })
        });
        StepTables {
            king,
            fox,
            lion_rays,
        }
    }
}

pub static STEP_TABLES: Lazy<StepTables> = Lazy::new(StepTables::new);

/// Destinations satisfying the piece's movement pattern, ignoring any check
/// this leaves on the mover's own king.
pub fn pseudo_moves(board: &Board, piece: Piece, from: Square) -> Vec<Square> {
    match piece.kind {
        // The sage shares the king's unrestricted one-step mobility.
        PieceKind::King | PieceKind::Sage => {
            step_targets(board, piece.color, &STEP_TABLES.king[from.index()])
        }
        PieceKind::Fox => step_targets(board, piece.color, &STEP_TABLES.fox[from.index()]),
        PieceKind::Pawn => pawn_moves(board, piece.color, from),
        PieceKind::Lion => lion_moves(board, piece.color, from),
        // The tiger has no movement rule; it never leaves its square.
        PieceKind::Tiger => Vec::new(),
    }
}

fn step_targets(board: &Board, color: Color, targets: &[Square]) -> Vec<Square> {
    targets
        .iter()
        .copied()
        .filter(|&to| board.get(to).is_none_or(|piece| piece.color != color))
        .collect()
}

/// One step forward onto an empty square, or a diagonal-forward capture.
fn pawn_moves(board: &Board, color: Color, from: Square) -> Vec<Square> {
    let mut list = Vec::new();
    let dir = color.forward();
    if let Some(to) = from.offset(0, dir) {
        if board.get(to).is_none() {
            list.push(to);
        }
    }
    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if board.get(to).is_some_and(|piece| piece.color != color) {
                list.push(to);
            }
        }
    }
    list
}

/// Slides up to two squares orthogonally, stopping at the first occupied
/// square; an enemy stop is a capture, a friendly stop is excluded.
fn lion_moves(board: &Board, color: Color, from: Square) -> Vec<Square> {
    let mut list = Vec::new();
    for ray in &STEP_TABLES.lion_rays[from.index()] {
        for &to in ray {
            match board.get(to) {
                None => list.push(to),
                Some(piece) => {
                    if piece.color != color {
                        list.push(to);
                    }
                    break;
                }
            }
        }
    }
    list
}

/// Whether any piece of `attacker` has a pseudo-legal move onto `target`.
pub fn is_square_attacked_by(board: &Board, target: Square, attacker: Color) -> bool {
    board.pieces().any(|(square, piece)| {
        piece.color == attacker && pseudo_moves(board, piece, square).contains(&target)
    })
}

pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_square) = board.king_square(color) else {
        // Position construction guarantees a king per side.
        return true;
    };
    is_square_attacked_by(board, king_square, color.opponent())
}

/// Pseudo-legal destinations for the piece on `from`, pruned of every move
/// that leaves `turn`'s own king in check. Empty when `from` does not hold a
/// piece of the side to move.
pub fn legal_moves(board: &Board, from: Square, turn: Color) -> Vec<Square> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    if piece.color != turn {
        return Vec::new();
    }
    pseudo_moves(board, piece, from)
        .into_iter()
        .filter(|&to| {
            let mut hypothetical = board.clone();
            hypothetical.set(to, Some(piece));
            hypothetical.set(from, None);
            !is_in_check(&hypothetical, turn)
        })
        .collect()
}

/// Whether `color` has at least one legal move anywhere on the board.
pub fn side_has_any_move(board: &Board, color: Color) -> bool {
    board
        .pieces()
        .any(|(square, piece)| piece.color == color && !legal_moves(board, square, color).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(kind: PieceKind, color: Color) -> Piece {
        Piece::new(kind, color)
    }

    #[test]
    fn pawn_never_captures_forward() {
        let mut board = Board::empty();
        let white_pawn = piece(PieceKind::Pawn, Color::White);
        board.set(Square::new(4, 4), Some(white_pawn));
        board.set(Square::new(4, 3), Some(piece(PieceKind::Pawn, Color::Black)));
        board.set(Square::new(3, 3), Some(piece(PieceKind::Fox, Color::Black)));

        let moves = pseudo_moves(&board, white_pawn, Square::new(4, 4));
        // Forward is blocked by the enemy, not captured; only the occupied
        // diagonal is a capture.
        assert_eq!(moves, vec![Square::new(3, 3)]);
    }

    #[test]
    fn pawn_never_moves_diagonally_onto_empty() {
        let mut board = Board::empty();
        let white_pawn = piece(PieceKind::Pawn, Color::White);
        board.set(Square::new(4, 4), Some(white_pawn));

        let moves = pseudo_moves(&board, white_pawn, Square::new(4, 4));
        assert_eq!(moves, vec![Square::new(4, 3)]);
    }

    #[test]
    fn pawns_advance_in_their_own_direction() {
        let mut board = Board::empty();
        let black_pawn = piece(PieceKind::Pawn, Color::Black);
        board.set(Square::new(4, 4), Some(black_pawn));

        let moves = pseudo_moves(&board, black_pawn, Square::new(4, 4));
        assert_eq!(moves, vec![Square::new(4, 5)]);
    }

    #[test]
    fn lion_stops_at_the_first_occupied_square() {
        let mut board = Board::empty();
        let white_lion = piece(PieceKind::Lion, Color::White);
        board.set(Square::new(4, 4), Some(white_lion));
        // Friendly blocker one step east, enemy one step south.
        board.set(Square::new(5, 4), Some(piece(PieceKind::Pawn, Color::White)));
        board.set(Square::new(4, 5), Some(piece(PieceKind::Pawn, Color::Black)));

        let mut moves = pseudo_moves(&board, white_lion, Square::new(4, 4));
        moves.sort_by_key(|square| square.index());
        let mut expected = vec![
            Square::new(4, 2),
            Square::new(4, 3),
            Square::new(2, 4),
            Square::new(3, 4),
            Square::new(4, 5),
        ];
        expected.sort_by_key(|square| square.index());
        assert_eq!(moves, expected);
    }

    #[test]
    fn tiger_never_moves() {
        let mut board = Board::empty();
        let white_tiger = piece(PieceKind::Tiger, Color::White);
        board.set(Square::new(4, 4), Some(white_tiger));
        board.set(Square::new(4, 3), Some(piece(PieceKind::Pawn, Color::Black)));
        assert!(pseudo_moves(&board, white_tiger, Square::new(4, 4)).is_empty());

        let cornered = piece(PieceKind::Tiger, Color::Black);
        let mut board = Board::empty();
        board.set(Square::new(0, 0), Some(cornered));
        assert!(pseudo_moves(&board, cornered, Square::new(0, 0)).is_empty());
    }

    #[test]
    fn fox_offsets_are_discarded_at_the_edge() {
        let board = Board::empty();
        let white_fox = piece(PieceKind::Fox, Color::White);
        let mut moves = pseudo_moves(&board, white_fox, Square::new(0, 0));
        moves.sort_by_key(|square| square.index());
        assert_eq!(moves, vec![Square::new(2, 1), Square::new(1, 2)]);
    }

    #[test]
    fn sage_matches_king_mobility() {
        let board = Board::empty();
        let from = Square::new(4, 4);
        let sage_moves = pseudo_moves(&board, piece(PieceKind::Sage, Color::White), from);
        let king_moves = pseudo_moves(&board, piece(PieceKind::King, Color::White), from);
        assert_eq!(sage_moves.len(), 8);
        assert_eq!(sage_moves, king_moves);
    }

    #[test]
    fn pinned_lion_may_only_capture_its_attacker() {
        // A black lion two squares above the white king, screened only by a
        // white lion: the screen may capture the attacker but not step aside.
        let board = Board::from_placement("4k4/9/9/9/9/9/4l4/4L4/4K4").unwrap();
        let moves = legal_moves(&board, Square::new(4, 7), Color::White);
        assert_eq!(moves, vec![Square::new(4, 6)]);
    }

    #[test]
    fn legal_moves_is_empty_for_the_idle_side() {
        let board = Board::initial();
        assert!(legal_moves(&board, Square::new(4, 0), Color::White).is_empty());
        assert!(legal_moves(&board, Square::new(4, 4), Color::White).is_empty());
    }
}
