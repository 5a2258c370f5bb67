//! Exhaustive minimax search.
//!
//! Scores are from the opponent's point of view: positive when the
//! opponent wins, negative when the player wins, zero for a draw. Wins
//! are worth `10 - depth` so nearer wins and farther losses score better.

use crate::board::Board;
use crate::types::Side;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Base magnitude of a decided game before the depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// A candidate cell and the minimax value of playing there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveScore {
    /// Cell the opponent would occupy.
    pub cell: usize,
    /// Minimax value of the resulting position.
    pub score: i32,
}

/// Returns the minimax value of `board`.
///
/// `opponent_to_move` selects the maximizing (opponent) or minimizing
/// (player) side. No depth limit or cache: every call fills one more
/// cell, so recursion ends after at most nine levels.
pub fn evaluate(board: Board, depth: i32, opponent_to_move: bool) -> i32 {
    if board.is_win(Side::Opponent) {
        return WIN_SCORE - depth;
    }
    if board.is_win(Side::Player) {
        return depth - WIN_SCORE;
    }
    if board.is_full() {
        return 0;
    }

    let (side, children) = if opponent_to_move {
        (Side::Opponent, false)
    } else {
        (Side::Player, true)
    };

    let scores = board
        .empty_cells()
        .into_iter()
        .map(|cell| evaluate(board.with_move(cell, side), depth + 1, children));

    if opponent_to_move {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

/// Scores every empty cell as an opponent move, in ascending cell order.
///
/// Each candidate is evaluated at depth 0 with the player to reply.
#[instrument(skip(board), fields(empty = board.empty_cells().len()))]
pub fn score_moves(board: &Board) -> Vec<MoveScore> {
    let scores: Vec<MoveScore> = board
        .empty_cells()
        .into_iter()
        .map(|cell| {
            let score = evaluate(board.with_move(cell, Side::Opponent), 0, false);
            MoveScore::new(cell, score)
        })
        .collect();
    debug!(?scores, "Scored candidate moves");
    scores
}
