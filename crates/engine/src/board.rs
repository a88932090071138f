//! The mailbox board representation for the game.

use crate::constants::{Color, Piece, PieceKind};
use crate::errors::PositionError;
use std::fmt;

/// Number of files and ranks.
pub const BOARD_SIZE: usize = 9;
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Placement of the starting position. Rank 0 (black's back rank) first.
pub const START_PLACEMENT: &str = "ppfpkpfpp/2l1t1l2/4s4/9/9/9/4S4/2L1T1L2/PPFPKPFPP";

/// A coordinate on the 9x9 board. Rank 0 is black's back rank, rank 8 is
/// white's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Both coordinates must be below 9.
    pub const fn new(file: u8, rank: u8) -> Square {
        assert!(file < BOARD_SIZE as u8 && rank < BOARD_SIZE as u8);
        Square { file, rank }
    }

    pub fn from_index(index: usize) -> Square {
        debug_assert!(index < SQUARE_COUNT);
        Square {
            file: (index % BOARD_SIZE) as u8,
            rank: (index / BOARD_SIZE) as u8,
        }
    }

    /// Index into the flat cell array.
    pub fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// The square `df` files and `dr` ranks away, or `None` when that falls
    /// off the board.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        let extent = 0..BOARD_SIZE as i8;
        if extent.contains(&file) && extent.contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Coordinate label, e.g. "E1" for the white king's starting square.
    /// Files run A..I left to right, rank labels 9..1 top to bottom.
    pub fn label(self) -> String {
        format!("{}{}", (b'A' + self.file) as char, 9 - self.rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A 9x9 grid of optional pieces. Pure data: no validation beyond what the
/// constructors enforce, and cloning shares nothing with the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; SQUARE_COUNT],
}

impl Board {
    pub fn empty() -> Board {
        Board {
            cells: [None; SQUARE_COUNT],
        }
    }

    /// The starting position: each army mirrored across the board's midline.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for (color, back, second, third) in
            [(Color::White, 8, 7, 6), (Color::Black, 0, 1, 2)]
        {
            board.set(Square::new(4, back), Some(Piece::new(PieceKind::King, color)));
            for file in [2, 6] {
                board.set(Square::new(file, back), Some(Piece::new(PieceKind::Fox, color)));
                board.set(Square::new(file, second), Some(Piece::new(PieceKind::Lion, color)));
            }
            for file in [0, 1, 3, 5, 7, 8] {
                board.set(Square::new(file, back), Some(Piece::new(PieceKind::Pawn, color)));
            }
            board.set(Square::new(4, second), Some(Piece::new(PieceKind::Tiger, color)));
            board.set(Square::new(4, third), Some(Piece::new(PieceKind::Sage, color)));
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    /// All occupied squares, rank 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (Square::from_index(index), piece)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// Parses a placement string: 9 rank groups separated by '/', rank 0
    /// first, letters KLFPST (lowercase for black), digits for runs of empty
    /// files. Rejects positions without exactly one king per color.
    pub fn from_placement(placement: &str) -> Result<Board, PositionError> {
        let mut board = Board::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != BOARD_SIZE {
            return Err(PositionError::BadRankCount(ranks.len()));
        }
        for (rank, group) in ranks.iter().enumerate() {
            let mut file = 0;
            for ch in group.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 {
                        return Err(PositionError::InvalidChar(ch));
                    }
                    file += run as usize;
                } else {
                    let piece =
                        Piece::from_layout_char(ch).ok_or(PositionError::InvalidChar(ch))?;
                    if file >= BOARD_SIZE {
                        return Err(PositionError::BadRankWidth(rank));
                    }
                    board.set(Square::new(file as u8, rank as u8), Some(piece));
                    file += 1;
                }
            }
            if file != BOARD_SIZE {
                return Err(PositionError::BadRankWidth(rank));
            }
        }
        for color in [Color::White, Color::Black] {
            let kings = board
                .pieces()
                .filter(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
                .count();
            match kings {
                0 => return Err(PositionError::MissingKing(color)),
                1 => {}
                _ => return Err(PositionError::DuplicateKing(color)),
            }
        }
        Ok(board)
    }

    /// The inverse of [`Board::from_placement`].
    pub fn placement(&self) -> String {
        let mut text = String::with_capacity(96);
        for rank in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for file in 0..BOARD_SIZE {
                match self.get(Square::new(file as u8, rank as u8)) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            text.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        text.push(piece.to_layout_char());
                    }
                }
            }
            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }
            if rank < BOARD_SIZE - 1 {
                text.push('/');
            }
        }
        text
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..BOARD_SIZE {
            write!(f, "{} ", 9 - rank)?;
            for file in 0..BOARD_SIZE {
                let cell = self
                    .get(Square::new(file as u8, rank as u8))
                    .map_or('.', Piece::to_layout_char);
                write!(f, " {cell}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   A B C D E F G H I")
    }
}
