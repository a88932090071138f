//! Error types for position construction.

use crate::constants::Color;
use thiserror::Error;

/// Reasons a placement or layout string fails to describe a valid position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("invalid character in placement: '{0}'")]
    InvalidChar(char),
    #[error("rank {0} does not describe exactly 9 files")]
    BadRankWidth(usize),
    #[error("placement must describe exactly 9 ranks, got {0}")]
    BadRankCount(usize),
    #[error("{0:?} has no king")]
    MissingKing(Color),
    #[error("{0:?} has more than one king")]
    DuplicateKing(Color),
    #[error("invalid side to move: '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),
    #[error("layout must contain a placement and a side to move")]
    MissingField,
}
