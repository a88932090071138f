//! The interactive game state machine.

use crate::board::{Board, Square};
use crate::constants::{Color, Piece, PieceKind};
use crate::errors::PositionError;
use crate::history::{Direction, HistoryLog};
use crate::move_gen;
use crate::r#move::Move;
use tracing::{debug, info};

/// Starting layout: placement plus the side to move.
pub const START_LAYOUT: &str = "ppfpkpfpp/2l1t1l2/4s4/9/9/9/4S4/2L1T1L2/PPFPKPFPP w";

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// What a click on a board square amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A piece of the side to move is now selected; its legal destinations
    /// (possibly none) are cached on the game.
    Selected,
    /// The selection was dropped.
    Deselected,
    /// The selected piece moved. `Some` exactly when this move ended the
    /// game.
    Moved(Option<Outcome>),
    /// The click had no effect.
    Ignored,
}

/// The full state of one game: board, turn, selection, outcome and history.
/// Every instance is independent; all mutation goes through its methods.
#[derive(Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    selected: Option<Square>,
    legal: Vec<Square>,
    outcome: Option<Outcome>,
    history: HistoryLog,
}

impl Game {
    /// A fresh game from the starting position, white to move.
    pub fn new() -> Game {
        Self::with_position(Board::initial(), Color::White)
    }

    /// Builds a game from `"<placement> <w|b>"` notation.
    pub fn from_layout(layout: &str) -> Result<Game, PositionError> {
        let mut parts = layout.split_whitespace();
        let placement = parts.next().ok_or(PositionError::MissingField)?;
        let side = parts.next().ok_or(PositionError::MissingField)?;
        let board = Board::from_placement(placement)?;
        let turn = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(PositionError::InvalidSideToMove(side.to_string())),
        };
        Ok(Self::with_position(board, turn))
    }

    fn with_position(board: Board, turn: Color) -> Game {
        Game {
            history: HistoryLog::new(board.clone()),
            board,
            turn,
            selected: None,
            legal: Vec::new(),
            outcome: None,
        }
    }

    /// Atomically resets to the starting position.
    pub fn new_game(&mut self) {
        *self = Game::new();
        info!("new game");
    }

    /// The single entry point for pointer input on a board square.
    ///
    /// Clicks are inert once the game is over and while an earlier position
    /// is being browsed; moves are only played from the tip of the history.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.outcome.is_some() || !self.history.at_tip() {
            return ClickOutcome::Ignored;
        }
        if let Some(from) = self.selected {
            if self.legal.contains(&square) {
                if let Some(piece) = self.board.get(from) {
                    return ClickOutcome::Moved(self.apply_move(piece, Move::new(from, square)));
                }
            }
        }
        self.update_selection(square)
    }

    fn update_selection(&mut self, square: Square) -> ClickOutcome {
        match self.board.get(square) {
            Some(piece) if piece.color == self.turn => {
                self.selected = Some(square);
                self.legal = move_gen::legal_moves(&self.board, square, self.turn);
                ClickOutcome::Selected
            }
            _ => {
                if self.selected.take().is_some() {
                    self.legal.clear();
                    ClickOutcome::Deselected
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    fn apply_move(&mut self, piece: Piece, mv: Move) -> Option<Outcome> {
        debug_assert!(
            self.board.get(mv.to).is_none_or(|p| p.kind != PieceKind::King),
            "a king is never a capture target in legal play",
        );
        let text = mv.describe(piece);
        self.board.set(mv.to, Some(piece));
        self.board.set(mv.from, None);
        self.selected = None;
        self.legal.clear();

        let mover = self.turn;
        self.turn = mover.opponent();
        debug!(played = %text, "move applied");
        self.history.record(text, self.board.clone());

        if move_gen::side_has_any_move(&self.board, self.turn) {
            return None;
        }
        let outcome = if move_gen::is_in_check(&self.board, self.turn) {
            Outcome::Checkmate { winner: mover }
        } else {
            Outcome::Stalemate
        };
        self.outcome = Some(outcome);
        info!(?outcome, "game over");
        Some(outcome)
    }

    /// Shows an earlier or later position without touching the move log.
    /// Returns false at the bounds of the history.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match self.history.navigate(direction) {
            Some((board, turn)) => {
                self.board = board;
                self.turn = turn;
                self.selected = None;
                self.legal.clear();
                true
            }
            None => false,
        }
    }

    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.history.can_navigate(direction)
    }

    /// Whether an earlier position is being shown. Move input is rejected
    /// until the cursor returns to the tip.
    pub fn browsing(&self) -> bool {
        !self.history.at_tip()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Legal destinations of the selected piece, for highlighting.
    pub fn legal_destinations(&self) -> &[Square] {
        &self.legal
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Display strings of the moves played so far.
    pub fn moves(&self) -> &[String] {
        self.history.moves()
    }

    /// Current position and side to move in layout notation.
    pub fn layout(&self) -> String {
        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.board.placement(), side)
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
