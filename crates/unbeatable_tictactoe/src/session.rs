//! Game session controller.
//!
//! A [`GameSession`] owns one board and sequences turns through a small
//! state machine:
//!
//! ```text
//! AwaitingPlayer --select_cell--> PlayerWon | Draw | OpponentThinking
//! OpponentThinking --opponent_move--> OpponentWon | Draw | AwaitingPlayer
//! any --reset--> AwaitingPlayer
//! ```
//!
//! Input that does not fit the current phase is ignored rather than
//! reported as a failure, so a presentation layer can forward every click.
//! The pause between `OpponentThinking` and `opponent_move` belongs to the
//! presentation layer.

use crate::board::Board;
use crate::error::{MoveError, StateError};
use crate::invariants;
use crate::rules::GameResult;
use crate::selector::{MoveSelector, RandomTieBreaker, Selection, TieBreaker};
use crate::types::Side;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Phase of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to pick a cell.
    AwaitingPlayer,
    /// The opponent is about to move.
    OpponentThinking,
    /// The human completed a line.
    PlayerWon,
    /// The opponent completed a line.
    OpponentWon,
    /// The board filled up without a line.
    Draw,
}

impl Phase {
    /// Returns true once the game is decided.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::PlayerWon | Phase::OpponentWon | Phase::Draw)
    }

    /// Derives the phase of a board reached by alternating play with the
    /// human first: a decided board gives its terminal phase, equal mark
    /// counts mean the human is to move, and one extra `X` means the
    /// opponent is.
    ///
    /// # Errors
    ///
    /// [`StateError::UnreachableBoard`] if no such game produces `board`.
    pub fn from_board(board: &Board) -> Result<Self, StateError> {
        let count = |side: Side| {
            board
                .squares()
                .iter()
                .filter(|s| s.side() == Some(side))
                .count()
        };
        let (player, opponent) = (count(Side::Player), count(Side::Opponent));
        let player_won = board.is_win(Side::Player);
        let opponent_won = board.is_win(Side::Opponent);

        match (player.checked_sub(opponent), player_won, opponent_won) {
            (_, true, true) => Err(StateError::UnreachableBoard),
            (Some(1), true, false) => Ok(Phase::PlayerWon),
            (Some(0), false, true) => Ok(Phase::OpponentWon),
            (Some(0 | 1), false, false) if board.is_full() => Ok(Phase::Draw),
            (Some(0), false, false) => Ok(Phase::AwaitingPlayer),
            (Some(1), false, false) => Ok(Phase::OpponentThinking),
            _ => Err(StateError::UnreachableBoard),
        }
    }

    /// Status line shown for this phase.
    pub fn status(self) -> Status {
        match self {
            Phase::AwaitingPlayer => Status::PlayersTurn,
            Phase::OpponentThinking => Status::OpponentThinking,
            Phase::PlayerWon => Status::PlayerWon,
            Phase::OpponentWon => Status::OpponentWon,
            Phase::Draw => Status::Draw,
        }
    }
}

/// Status reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Status {
    /// The human may move.
    #[display("player's turn")]
    PlayersTurn,
    /// The opponent's move is pending.
    #[display("opponent thinking")]
    OpponentThinking,
    /// The human won.
    #[display("player won")]
    PlayerWon,
    /// The opponent won.
    #[display("opponent won")]
    OpponentWon,
    /// Nobody won.
    #[display("draw")]
    Draw,
}

/// Receives renders from a session.
pub trait SessionObserver {
    /// The board changed; `board` is a snapshot.
    fn board_changed(&mut self, board: &Board);

    /// The status changed.
    fn status_changed(&mut self, status: Status);
}

/// Discards every notification.
impl SessionObserver for () {
    fn board_changed(&mut self, _board: &Board) {}

    fn status_changed(&mut self, _status: Status) {}
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum Ignored {
    /// The board refused the cell.
    #[display("{}", _0)]
    Move(MoveError),
    /// The session was in the wrong phase.
    #[display("{}", _0)]
    State(StateError),
}

/// Outcome of feeding one input to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The move was applied and the session entered `phase`.
    Accepted {
        /// Cell that was filled.
        cell: usize,
        /// Phase after the move.
        phase: Phase,
    },
    /// Nothing changed.
    Ignored(Ignored),
}

impl Transition {
    /// Returns true if the input changed the session.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Transition::Accepted { .. })
    }
}

/// One game against the minimax opponent.
#[derive(Debug, Clone)]
pub struct GameSession<T = RandomTieBreaker> {
    board: Board,
    phase: Phase,
    selector: MoveSelector<T>,
}

impl Default for GameSession<RandomTieBreaker> {
    fn default() -> Self {
        Self::new(RandomTieBreaker::default())
    }
}

impl<T: TieBreaker> GameSession<T> {
    /// Starts a fresh game; the human moves first.
    pub fn new(tie_breaker: T) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::AwaitingPlayer,
            selector: MoveSelector::new(tie_breaker),
        }
    }

    /// Continues a game from an existing position, in the phase
    /// [`Phase::from_board`] derives.
    ///
    /// # Errors
    ///
    /// [`StateError::UnreachableBoard`] if alternating play with the human
    /// first cannot produce `board`.
    #[instrument(skip(board, tie_breaker), fields(board = %board))]
    pub fn resume(board: Board, tie_breaker: T) -> Result<Self, StateError> {
        let phase = Phase::from_board(&board)?;
        debug!(?phase, "Resuming session");
        Ok(Self {
            board,
            phase,
            selector: MoveSelector::new(tie_breaker),
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the status for the current phase.
    pub fn status(&self) -> Status {
        self.phase.status()
    }

    /// Returns the result derived from the board.
    pub fn result(&self) -> GameResult {
        GameResult::of(&self.board)
    }

    /// Handles the human choosing `cell`.
    ///
    /// Ignored unless the session is awaiting the player and the cell is
    /// empty and on the board.
    #[instrument(skip(self, observer), fields(phase = ?self.phase))]
    pub fn select_cell(&mut self, cell: usize, observer: &mut impl SessionObserver) -> Transition {
        if self.phase != Phase::AwaitingPlayer {
            return Self::ignore(StateError::NotPlayersTurn(self.phase).into());
        }

        let before = self.board;
        if let Err(e) = self.board.place(cell, Side::Player) {
            return Self::ignore(e.into());
        }
        Self::check_invariants(&before, &self.board);
        observer.board_changed(&self.board);

        self.phase = match GameResult::of(&self.board) {
            GameResult::PlayerWin => Phase::PlayerWon,
            GameResult::Draw => Phase::Draw,
            _ => Phase::OpponentThinking,
        };
        info!(cell, phase = ?self.phase, "Player moved");
        observer.status_changed(self.status());

        Transition::Accepted {
            cell,
            phase: self.phase,
        }
    }

    /// Handles the thinking delay elapsing: the opponent moves.
    #[instrument(skip(self, observer), fields(phase = ?self.phase))]
    pub fn opponent_move(&mut self, observer: &mut impl SessionObserver) -> Transition {
        if self.phase != Phase::OpponentThinking {
            return Self::ignore(StateError::NotOpponentsTurn(self.phase).into());
        }

        let Selection { cell, reason, .. } = match self.selector.choose(&self.board) {
            Ok(selection) => selection,
            Err(e) => {
                warn!(error = %e, "Opponent had no move");
                return Transition::Ignored(e.into());
            }
        };

        let before = self.board;
        if let Err(e) = self.board.place(cell, Side::Opponent) {
            warn!(error = %e, cell, "Selector chose an unplayable cell");
            return Transition::Ignored(e.into());
        }
        Self::check_invariants(&before, &self.board);
        observer.board_changed(&self.board);

        self.phase = match GameResult::of(&self.board) {
            GameResult::OpponentWin => Phase::OpponentWon,
            GameResult::Draw => Phase::Draw,
            _ => Phase::AwaitingPlayer,
        };
        info!(cell, %reason, phase = ?self.phase, "Opponent moved");
        observer.status_changed(self.status());

        Transition::Accepted {
            cell,
            phase: self.phase,
        }
    }

    /// Plays the human's move and, if the game goes on, the opponent's
    /// reply without any pause. Returns the player's transition.
    pub fn play_round(&mut self, cell: usize, observer: &mut impl SessionObserver) -> Transition {
        let transition = self.select_cell(cell, observer);
        if self.phase == Phase::OpponentThinking {
            self.opponent_move(observer);
        }
        transition
    }

    /// Starts over with an empty board, from any phase.
    #[instrument(skip(self, observer), fields(phase = ?self.phase))]
    pub fn reset(&mut self, observer: &mut impl SessionObserver) {
        info!("Resetting game");
        self.board = Board::new();
        self.phase = Phase::AwaitingPlayer;
        observer.board_changed(&self.board);
        observer.status_changed(self.status());
    }

    fn ignore(reason: Ignored) -> Transition {
        debug!(%reason, "Ignoring input");
        Transition::Ignored(reason)
    }

    fn check_invariants(before: &Board, after: &Board) {
        if cfg!(debug_assertions) {
            let broken = invariants::violations(before, after);
            assert!(broken.is_empty(), "invariants violated: {broken:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::FirstTieBreaker;

    /// Records every notification in order.
    #[derive(Default)]
    struct Recorder {
        boards: Vec<Board>,
        statuses: Vec<Status>,
    }

    impl SessionObserver for Recorder {
        fn board_changed(&mut self, board: &Board) {
            self.boards.push(*board);
        }

        fn status_changed(&mut self, status: Status) {
            self.statuses.push(status);
        }
    }

    #[test]
    fn test_player_move_enters_thinking() {
        let mut session = GameSession::new(FirstTieBreaker);
        let mut recorder = Recorder::default();

        let transition = session.select_cell(0, &mut recorder);
        assert_eq!(
            transition,
            Transition::Accepted {
                cell: 0,
                phase: Phase::OpponentThinking
            }
        );
        assert_eq!(recorder.statuses, vec![Status::OpponentThinking]);
        assert_eq!(recorder.boards.len(), 1);
    }

    #[test]
    fn test_input_while_thinking_is_ignored() {
        let mut session = GameSession::new(FirstTieBreaker);
        session.select_cell(0, &mut ());
        let board = *session.board();

        let mut recorder = Recorder::default();
        let transition = session.select_cell(1, &mut recorder);
        assert_eq!(
            transition,
            Transition::Ignored(Ignored::State(StateError::NotPlayersTurn(
                Phase::OpponentThinking
            )))
        );
        assert_eq!(*session.board(), board);
        assert!(recorder.boards.is_empty());
        assert!(recorder.statuses.is_empty());
    }

    #[test]
    fn test_opponent_move_out_of_turn_is_ignored() {
        let mut session = GameSession::new(FirstTieBreaker);
        assert!(!session.opponent_move(&mut ()).is_accepted());
        assert_eq!(*session.board(), Board::new());
        assert_eq!(session.phase(), Phase::AwaitingPlayer);
    }

    #[test]
    fn test_out_of_range_cell_is_ignored() {
        let mut session = GameSession::new(FirstTieBreaker);
        let transition = session.select_cell(9, &mut ());
        assert_eq!(
            transition,
            Transition::Ignored(Ignored::Move(MoveError::OutOfRange(9)))
        );
        assert_eq!(session.phase(), Phase::AwaitingPlayer);
    }

    #[test]
    fn test_phase_from_board() {
        let phase = |pattern| Phase::from_board(&Board::from_pattern(pattern).unwrap());
        assert_eq!(phase("XX_ OO_ ___"), Ok(Phase::AwaitingPlayer));
        assert_eq!(phase("XX_ OO_ X__"), Ok(Phase::OpponentThinking));
        assert_eq!(phase("XXX OO_ ___"), Ok(Phase::PlayerWon));
        assert_eq!(phase("XX_ OOO X__"), Ok(Phase::OpponentWon));
        assert_eq!(phase("XOX XOO OXX"), Ok(Phase::Draw));
        assert_eq!(phase("OO_ ___ ___"), Err(StateError::UnreachableBoard));
        assert_eq!(phase("XXX OOO ___"), Err(StateError::UnreachableBoard));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Status::PlayersTurn.to_string(), "player's turn");
        assert_eq!(Status::OpponentThinking.to_string(), "opponent thinking");
        assert_eq!(Status::PlayerWon.to_string(), "player won");
        assert_eq!(Status::OpponentWon.to_string(), "opponent won");
        assert_eq!(Status::Draw.to_string(), "draw");
    }
}
