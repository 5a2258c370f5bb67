//! Keyboard handling for the terminal UI.

use crossterm::event::KeyCode;
use unbeatable_tictactoe::Position;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor to a new position.
    MoveCursor(Position),
    /// Play the given position.
    Select(Position),
    /// Start a new game.
    Reset,
    /// Leave the program.
    Quit,
    /// Nothing to do.
    None,
}

/// Maps a key to an action, given the current cursor.
pub fn action_for_key(cursor: Position, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Select(cursor),
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|digit| (digit as usize).checked_sub(1))
            .and_then(Position::from_index)
            .map_or(Action::None, Action::Select),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Action::MoveCursor(move_cursor(cursor, key))
        }
        _ => Action::None,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_within_grid() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Down), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::BottomCenter, KeyCode::Right), Position::BottomRight);
    }

    #[test]
    fn test_cursor_stops_at_edges() {
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Down), Position::BottomRight);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
    }

    #[test]
    fn test_digits_select_cells() {
        let cursor = Position::Center;
        assert_eq!(
            action_for_key(cursor, KeyCode::Char('1')),
            Action::Select(Position::TopLeft)
        );
        assert_eq!(
            action_for_key(cursor, KeyCode::Char('9')),
            Action::Select(Position::BottomRight)
        );
        assert_eq!(action_for_key(cursor, KeyCode::Char('0')), Action::None);
    }

    #[test]
    fn test_control_keys() {
        let cursor = Position::TopRight;
        assert_eq!(action_for_key(cursor, KeyCode::Enter), Action::Select(cursor));
        assert_eq!(action_for_key(cursor, KeyCode::Char('r')), Action::Reset);
        assert_eq!(action_for_key(cursor, KeyCode::Esc), Action::Quit);
        assert_eq!(
            action_for_key(cursor, KeyCode::Down),
            Action::MoveCursor(Position::MiddleRight)
        );
    }
}
