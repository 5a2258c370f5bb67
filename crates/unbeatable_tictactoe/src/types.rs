//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// One of the two sides in a game.
///
/// The human player always plays `X` and moves first; the computer
/// opponent plays `O`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Side {
    /// The human player (mark `X`).
    #[display("X")]
    Player,
    /// The computer opponent (mark `O`).
    #[display("O")]
    Opponent,
}

impl Side {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Returns the mark drawn for this side.
    pub fn mark(self) -> char {
        match self {
            Side::Player => 'X',
            Side::Opponent => 'O',
        }
    }

    /// Parses a mark character (`X` or `O`, case-insensitive).
    pub fn from_mark(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(Side::Player),
            'O' => Some(Side::Opponent),
            _ => None,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a side.
    Occupied(Side),
}

impl Square {
    /// Returns true if nobody has played here.
    pub fn is_empty(self) -> bool {
        matches!(self, Square::Empty)
    }

    /// Returns the occupying side, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::Occupied(side) => Some(side),
        }
    }
}
