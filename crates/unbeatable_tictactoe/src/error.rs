//! Error types for board and session operations.

use crate::session::Phase;

/// A move that the board refuses.
///
/// Always recoverable: the session treats it as ignored input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell index is outside 0-8.
    #[display("Cell {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),
}

impl std::error::Error for MoveError {}

/// An operation invoked in a state where it is not allowed.
///
/// A correct presentation layer never provokes these; the session
/// converts the phase variants into ignored transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StateError {
    /// A player move arrived outside `AwaitingPlayer`.
    #[display("Player cannot move during {:?}", _0)]
    NotPlayersTurn(Phase),

    /// The opponent was asked to move outside `OpponentThinking`.
    #[display("Opponent cannot move during {:?}", _0)]
    NotOpponentsTurn(Phase),

    /// Move selection was requested on a full board.
    #[display("No empty cells left to choose from")]
    NoEmptyCells,

    /// A position that alternating play, human first, cannot reach.
    #[display("Board cannot arise from alternating play with X first")]
    UnreachableBoard,
}

impl std::error::Error for StateError {}

/// A textual board pattern that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PatternError {
    /// The pattern does not describe exactly nine cells.
    #[display("Board pattern must have 9 cells, found {}", _0)]
    WrongLength(usize),

    /// A character is neither a mark nor an empty-cell marker.
    #[display("Unexpected character {:?} in board pattern", _0)]
    BadCharacter(char),
}

impl std::error::Error for PatternError {}
