//! Game rules evaluated over a board.
//!
//! Results are always derived from the squares; nothing here stores
//! state, so a result can never drift from the board it describes.

use crate::board::{Board, LINES};
use crate::types::{Side, Square};
use serde::{Deserialize, Serialize};

/// Outcome of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameResult {
    /// Nobody has a line and empty cells remain.
    #[display("in progress")]
    InProgress,
    /// The human player completed a line.
    #[display("player win")]
    PlayerWin,
    /// The opponent completed a line.
    #[display("opponent win")]
    OpponentWin,
    /// The board is full without a line.
    #[display("draw")]
    Draw,
}

impl GameResult {
    /// Derives the result from a board.
    ///
    /// The opponent's line is checked first, matching the search's
    /// terminal priority. Legal play never produces both.
    pub fn of(board: &Board) -> Self {
        if board.is_win(Side::Opponent) {
            GameResult::OpponentWin
        } else if board.is_win(Side::Player) {
            GameResult::PlayerWin
        } else if board.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Returns true for every result except `InProgress`.
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

/// Finds the empty cell that would complete a line for `side`.
///
/// Scans lines in [`LINES`] order and returns the gap of the first line
/// holding two of `side`'s marks and one empty square.
pub fn completing_cell(board: &Board, side: Side) -> Option<usize> {
    let mark = Square::Occupied(side);
    LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&cell| board.get(cell) == Some(mark)).count();
        let gap = line.iter().copied().find(|&cell| board.is_empty(cell));
        if owned == 2 { gap } else { None }
    })
}
