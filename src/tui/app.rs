//! Application state rendered by the terminal UI.

use tracing::debug;
use unbeatable_tictactoe::{Board, Position, SessionObserver, Status};

/// What the screen shows: the last board and status the session sent.
#[derive(Debug, Clone)]
pub struct App {
    board: Board,
    status: Status,
    cursor: Position,
}

impl App {
    /// Creates a new application showing an empty board.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: Status::PlayersTurn,
            cursor: Position::Center,
        }
    }

    /// Gets the rendered board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Gets the rendered status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Moves the cursor.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Status line with a hint for what to do next.
    pub fn status_message(&self) -> String {
        match self.status {
            Status::PlayersTurn => "Your turn (X). Pick a square.".to_string(),
            Status::OpponentThinking => "Opponent (O) is thinking...".to_string(),
            Status::PlayerWon => "You win! Press 'r' to restart or 'q' to quit.".to_string(),
            Status::OpponentWon => {
                "Opponent wins! Press 'r' to restart or 'q' to quit.".to_string()
            }
            Status::Draw => {
                "Game ended in a draw! Press 'r' to restart or 'q' to quit.".to_string()
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionObserver for App {
    fn board_changed(&mut self, board: &Board) {
        debug!(board = %board, "Board changed");
        self.board = *board;
    }

    fn status_changed(&mut self, status: Status) {
        debug!(%status, "Status changed");
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unbeatable_tictactoe::{FirstTieBreaker, GameSession};

    #[test]
    fn test_app_mirrors_session() {
        let mut app = App::new();
        let mut session = GameSession::new(FirstTieBreaker);

        session.select_cell(0, &mut app);
        assert_eq!(app.status(), Status::OpponentThinking);
        assert!(app.status_message().contains("thinking"));

        session.opponent_move(&mut app);
        assert_eq!(app.board(), session.board());
        assert_eq!(app.status(), Status::PlayersTurn);
    }

    #[test]
    fn test_reset_clears_screen() {
        let mut app = App::new();
        let mut session = GameSession::new(FirstTieBreaker);
        session.play_round(4, &mut app);
        session.reset(&mut app);
        assert_eq!(*app.board(), Board::new());
        assert_eq!(app.status(), Status::PlayersTurn);
    }
}
