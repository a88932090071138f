//! Piece and color definitions shared across the engine.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Get the opponent of the current side.
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of this side's forward direction. White advances toward
    /// rank 0, black toward rank 8.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

/// The six piece categories of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Lion,
    Fox,
    Pawn,
    Sage,
    Tiger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Letter used in placement strings: uppercase for white, lowercase for
    /// black.
    pub fn to_layout_char(self) -> char {
        let ch = match self.kind {
            PieceKind::King => 'K',
            PieceKind::Lion => 'L',
            PieceKind::Fox => 'F',
            PieceKind::Pawn => 'P',
            PieceKind::Sage => 'S',
            PieceKind::Tiger => 'T',
        };
        match self.color {
            Color::White => ch,
            Color::Black => ch.to_ascii_lowercase(),
        }
    }

    pub fn from_layout_char(ch: char) -> Option<Piece> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_uppercase() {
            'K' => PieceKind::King,
            'L' => PieceKind::Lion,
            'F' => PieceKind::Fox,
            'P' => PieceKind::Pawn,
            'S' => PieceKind::Sage,
            'T' => PieceKind::Tiger,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    /// Symbol drawn on the board and written into the move log.
    pub fn glyph(self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, Color::White) => '▲',
            (PieceKind::King, Color::Black) => '△',
            (PieceKind::Lion, Color::White) => '⏺',
            (PieceKind::Lion, Color::Black) => '●',
            (PieceKind::Fox, Color::White) => '⧫',
            (PieceKind::Fox, Color::Black) => '⬥',
            (PieceKind::Pawn, Color::White) => '⬟',
            (PieceKind::Pawn, Color::Black) => '⬢',
            (PieceKind::Sage, Color::White) => '⬤',
            (PieceKind::Sage, Color::Black) => '◉',
            (PieceKind::Tiger, Color::White) => '⬩',
            (PieceKind::Tiger, Color::Black) => '⬧',
        }
    }
}
