//! Headless position analysis for the `evaluate` command.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument};
use unbeatable_tictactoe::{
    Board, FirstTieBreaker, GameResult, GameSession, MoveScore, MoveSelector, Phase, Position,
    Selection, StateError, TieBreaker, Transition, score_moves,
};

/// Minimax view of one position from the opponent's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// The board, one row per line.
    pub board: String,
    /// Whose turn it is, or how the game ended.
    pub phase: Phase,
    /// Result derived from the board.
    pub result: GameResult,
    /// Score of every empty cell as an opponent move. Empty unless the
    /// opponent is to move.
    pub scores: Vec<MoveScore>,
    /// The selector's choice, when the opponent is to move.
    pub selection: Option<Selection>,
}

/// Scores `board` and asks the selector for its move.
///
/// Only a board where the opponent is to move gets scores and a
/// selection. Other reachable boards report their phase alone.
///
/// # Errors
///
/// [`StateError::UnreachableBoard`] if play with `X` moving first cannot
/// produce `board`.
#[instrument(skip(board, selector), fields(board = %board))]
pub fn analyze<T: TieBreaker>(
    board: &Board,
    selector: &mut MoveSelector<T>,
) -> Result<Analysis, StateError> {
    let phase = Phase::from_board(board)?;
    let (scores, selection) = if phase == Phase::OpponentThinking {
        (score_moves(board), selector.choose(board).ok())
    } else {
        (Vec::new(), None)
    };

    info!(?phase, pick = ?selection.as_ref().map(|s| s.cell), "Analysis complete");
    Ok(Analysis {
        board: board.to_string(),
        phase,
        result: GameResult::of(board),
        scores,
        selection,
    })
}

/// Plays the human's move at `cell` (a position label or a 0-based cell
/// number) and returns the new board.
#[instrument(skip(board), fields(board = %board))]
pub fn play_player_move(board: &Board, cell: &str) -> Result<Board> {
    let position = Position::from_label_or_number(cell)
        .with_context(|| format!("Unknown cell {cell:?}, expected 0-8 or a label"))?;
    let mut session = GameSession::resume(*board, FirstTieBreaker)?;

    match session.select_cell(position.to_index(), &mut ()) {
        Transition::Accepted { .. } => Ok(*session.board()),
        Transition::Ignored(reason) => bail!("Cannot play {position}: {reason}"),
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "Status: {}", self.phase.status())?;
        write!(f, "Result: {}", self.result)?;

        if !self.scores.is_empty() {
            writeln!(f)?;
            write!(f, "Opponent move scores:")?;
            for MoveScore { cell, score } in &self.scores {
                write!(f, "\n  cell {cell}: {score:+}")?;
            }
        }

        if let Some(selection) = &self.selection {
            writeln!(f)?;
            writeln!(f, "Best cells: {:?}", selection.ties)?;
            write!(f, "Pick: cell {} ({})", selection.cell, selection.reason)?;
        }
        Ok(())
    }
}
