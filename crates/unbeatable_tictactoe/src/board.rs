//! The 3x3 board and the rules for reading and writing it.

use crate::error::{MoveError, PatternError};
use crate::types::{Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// Index of the center cell.
pub const CENTER: usize = 4;

/// Every winning line: rows, columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 tic-tac-toe board.
///
/// Squares are stored in row-major order (0-8). The board is a small
/// `Copy` value, so search code works on copies rather than undoing
/// moves in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given cell, or `None` past the edge.
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Places a mark on an empty cell.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfRange`] past cell 8, [`MoveError::Occupied`] if
    /// the cell already holds a mark.
    pub fn place(&mut self, cell: usize, side: Side) -> Result<(), MoveError> {
        match self.get(cell) {
            None => Err(MoveError::OutOfRange(cell)),
            Some(Square::Occupied(_)) => Err(MoveError::Occupied(cell)),
            Some(Square::Empty) => {
                self.squares[cell] = Square::Occupied(side);
                Ok(())
            }
        }
    }

    /// Empties a cell again. Out-of-range cells are ignored.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn clear(&mut self, cell: usize) {
        if let Some(square) = self.squares.get_mut(cell) {
            *square = Square::Empty;
        }
    }

    /// Returns a copy of this board with `side` occupying `cell`.
    ///
    /// Callers must pass an empty cell; this is the hypothetical move used
    /// by search, which only ever enumerates [`Board::empty_cells`].
    pub fn with_move(mut self, cell: usize, side: Side) -> Self {
        debug_assert!(self.is_empty(cell), "hypothetical move on cell {cell}");
        self.squares[cell] = Square::Occupied(side);
        self
    }

    /// Returns true if `side` holds any complete line.
    pub fn is_win(&self, side: Side) -> bool {
        let mark = Square::Occupied(side);
        LINES
            .iter()
            .any(|line| line.iter().all(|&cell| self.squares[cell] == mark))
    }

    /// Returns true if no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| !s.is_empty())
    }

    /// Empty cell indices in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&cell| self.is_empty(cell)).collect()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }

    /// Parses a board from nine cell characters.
    ///
    /// `X` and `O` are marks; `_`, `.` and `-` are empty cells. Whitespace
    /// and `|` separators are skipped, so `"XX_|OO_|___"` is accepted.
    #[instrument]
    pub fn from_pattern(pattern: &str) -> Result<Self, PatternError> {
        let cells: Vec<char> = pattern
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if cells.len() != CELLS {
            return Err(PatternError::WrongLength(cells.len()));
        }

        let mut board = Self::new();
        for (cell, c) in cells.into_iter().enumerate() {
            board.squares[cell] = match c {
                '_' | '.' | '-' => Square::Empty,
                other => Square::Occupied(
                    Side::from_mark(other).ok_or(PatternError::BadCharacter(other))?,
                ),
            };
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.squares.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for square in chunk {
                let c = square.side().map_or('.', Side::mark);
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        assert_eq!(board.place(4, Side::Player), Ok(()));
        assert_eq!(board.place(4, Side::Opponent), Err(MoveError::Occupied(4)));
        assert_eq!(board.place(9, Side::Player), Err(MoveError::OutOfRange(9)));
        assert_eq!(board.get(4), Some(Square::Occupied(Side::Player)));
    }

    #[test]
    fn test_clear_restores_empty() {
        let mut board = Board::new();
        board.place(0, Side::Opponent).unwrap();
        board.clear(0);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::new();
        let next = board.with_move(2, Side::Player);
        assert!(board.is_empty(2));
        assert_eq!(next.get(2), Some(Square::Occupied(Side::Player)));
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::new();
        assert!(!board.is_win(Side::Player));
        assert!(!board.is_win(Side::Opponent));
    }

    #[test]
    fn test_every_line_wins_for_both_sides() {
        for side in [Side::Player, Side::Opponent] {
            for line in LINES {
                let mut board = Board::new();
                for cell in line {
                    board.place(cell, side).unwrap();
                }
                assert!(board.is_win(side), "{line:?} should win for {side}");
                assert!(!board.is_win(side.other()));
            }
        }
    }

    #[test]
    fn test_two_in_a_row_is_not_a_win() {
        let board = Board::from_pattern("XX_ ___ ___").unwrap();
        assert!(!board.is_win(Side::Player));
    }

    #[test]
    fn test_full_iff_no_empty_cells() {
        let mut board = Board::new();
        let order = [4, 0, 8, 2, 6, 3, 5, 1, 7];
        let mut side = Side::Player;
        for cell in order {
            assert!(!board.is_full());
            assert!(!board.empty_cells().is_empty());
            board.place(cell, side).unwrap();
            side = side.other();
        }
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board = Board::from_pattern("X_O _X_ O__").unwrap();
        assert_eq!(board.empty_cells(), vec![1, 3, 5, 7, 8]);
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_pattern_errors() {
        assert_eq!(Board::from_pattern("XO"), Err(PatternError::WrongLength(2)));
        assert_eq!(
            Board::from_pattern("XO?______"),
            Err(PatternError::BadCharacter('?'))
        );
    }

    #[test]
    fn test_display_matches_pattern() {
        let board = Board::from_pattern("XX_|OO_|___").unwrap();
        assert_eq!(board.to_string(), "XX.\nOO.\n...");
        assert_eq!(Board::from_pattern(&board.to_string()), Ok(board));
    }
}
