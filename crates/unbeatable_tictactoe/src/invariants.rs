//! Invariants that must hold across every accepted move.
//!
//! Each invariant compares the board before and after a transition. The
//! session checks them in debug builds; tests exercise them directly.

use crate::board::{Board, CELLS};

/// A property relating a board to its successor.
pub trait Invariant {
    /// Checks the property for one transition.
    fn holds(before: &Board, after: &Board) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Occupied squares never change or empty again.
pub struct MonotonicBoard;

impl Invariant for MonotonicBoard {
    fn holds(before: &Board, after: &Board) -> bool {
        (0..CELLS).all(|cell| {
            let old = before.get(cell);
            old.is_some_and(|square| square.is_empty()) || old == after.get(cell)
        })
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten or cleared)"
    }
}

/// Exactly one square goes from empty to occupied.
pub struct SingleMove;

impl Invariant for SingleMove {
    fn holds(before: &Board, after: &Board) -> bool {
        after.occupied_count() == before.occupied_count() + 1
            && MonotonicBoard::holds(before, after)
    }

    fn description() -> &'static str {
        "Each accepted move fills exactly one empty square"
    }
}

/// Returns the descriptions of every invariant the transition breaks.
pub fn violations(before: &Board, after: &Board) -> Vec<&'static str> {
    let mut broken = Vec::new();
    if !MonotonicBoard::holds(before, after) {
        broken.push(MonotonicBoard::description());
    }
    if !SingleMove::holds(before, after) {
        broken.push(SingleMove::description());
    }
    broken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Side;

    #[test]
    fn test_single_placement_holds() {
        let before = Board::new();
        let after = before.with_move(4, Side::Player);
        assert!(violations(&before, &after).is_empty());
    }

    #[test]
    fn test_overwrite_violates_monotonic() {
        let before = Board::from_pattern("X__ ___ ___").unwrap();
        let after = Board::from_pattern("O__ ___ ___").unwrap();
        assert!(!MonotonicBoard::holds(&before, &after));
        assert_eq!(violations(&before, &after).len(), 2);
    }

    #[test]
    fn test_double_placement_violates_single_move() {
        let before = Board::new();
        let after = Board::from_pattern("XO_ ___ ___").unwrap();
        assert!(MonotonicBoard::holds(&before, &after));
        assert!(!SingleMove::holds(&before, &after));
    }

    #[test]
    fn test_clearing_violates_monotonic() {
        let before = Board::from_pattern("X__ ___ ___").unwrap();
        let mut after = before;
        after.clear(0);
        assert!(!MonotonicBoard::holds(&before, &after));
    }
}
