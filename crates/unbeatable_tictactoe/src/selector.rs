//! Opponent move selection.
//!
//! The opponent takes the center whenever it is free. Otherwise every
//! empty cell is scored with minimax and one of the best-scoring cells is
//! picked by a [`TieBreaker`], so equally good games do not repeat.

use crate::board::{Board, CENTER};
use crate::error::StateError;
use crate::rules::completing_cell;
use crate::search::score_moves;
use crate::types::Side;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Chooses one candidate out of a set of equally scored cells.
pub trait TieBreaker {
    /// Returns an index into `candidates`. Never called with an empty slice.
    fn pick(&mut self, candidates: &[usize]) -> usize;
}

/// Uniformly random tie-breaking backed by a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomTieBreaker {
    rng: StdRng,
    seed: u64,
}

impl RandomTieBreaker {
    /// Creates a tie-breaker with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a tie-breaker seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// Returns the seed, so a game can be reproduced from logs.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RandomTieBreaker {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl TieBreaker for RandomTieBreaker {
    fn pick(&mut self, candidates: &[usize]) -> usize {
        self.rng.random_range(0..candidates.len())
    }
}

/// Always picks the lowest cell. Deterministic, for tests and analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstTieBreaker;

impl TieBreaker for FirstTieBreaker {
    fn pick(&mut self, _candidates: &[usize]) -> usize {
        0
    }
}

/// Why a cell was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Reason {
    /// The free center was taken without searching.
    #[display("center opening")]
    Center,
    /// Minimax found this cell among the best.
    #[display("minimax")]
    Minimax,
    /// The guard path ran after minimax produced no candidate.
    #[display("fallback")]
    Fallback,
}

/// A chosen opponent move and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Cell to occupy.
    pub cell: usize,
    /// Which rule produced the cell.
    pub reason: Reason,
    /// Best minimax score, when search ran.
    pub best_score: Option<i32>,
    /// Every cell sharing the best score, ascending.
    pub ties: Vec<usize>,
}

/// Picks the opponent's next cell.
#[derive(Debug, Clone, Default)]
pub struct MoveSelector<T = RandomTieBreaker> {
    tie_breaker: T,
}

impl<T: TieBreaker> MoveSelector<T> {
    /// Creates a selector around the given tie-breaker.
    pub fn new(tie_breaker: T) -> Self {
        Self { tie_breaker }
    }

    /// Chooses the opponent's move on `board`.
    ///
    /// # Errors
    ///
    /// [`StateError::NoEmptyCells`] if the board is full.
    #[instrument(skip(self, board), fields(occupied = board.occupied_count()))]
    pub fn choose(&mut self, board: &Board) -> Result<Selection, StateError> {
        if board.is_full() {
            return Err(StateError::NoEmptyCells);
        }

        if board.is_empty(CENTER) {
            debug!("Center is free, taking it");
            return Ok(Selection {
                cell: CENTER,
                reason: Reason::Center,
                best_score: None,
                ties: vec![CENTER],
            });
        }

        let mut best_score = i32::MIN;
        let mut ties = Vec::new();
        for candidate in score_moves(board) {
            if candidate.score > best_score {
                best_score = candidate.score;
                ties.clear();
                ties.push(candidate.cell);
            } else if candidate.score == best_score {
                ties.push(candidate.cell);
            }
        }

        debug_assert!(!ties.is_empty(), "search produced no candidate on a non-full board");
        if ties.is_empty() {
            return Ok(self.fallback(board));
        }

        let Some(cell) = ties.get(self.tie_breaker.pick(&ties)).copied() else {
            warn!(?ties, "Tie-breaker picked outside the candidates");
            return Ok(self.fallback(board));
        };
        info!(cell, best_score, ?ties, "Opponent chose move");
        Ok(Selection {
            cell,
            reason: Reason::Minimax,
            best_score: Some(best_score),
            ties,
        })
    }

    /// Win if possible, else block, else an empty cell chosen by the
    /// tie-breaker.
    fn fallback(&mut self, board: &Board) -> Selection {
        let cell = completing_cell(board, Side::Opponent)
            .or_else(|| completing_cell(board, Side::Player))
            .or_else(|| {
                let empty = board.empty_cells();
                if empty.is_empty() {
                    return None;
                }
                empty.get(self.tie_breaker.pick(&empty)).copied()
            })
            .or_else(|| board.empty_cells().first().copied())
            .unwrap_or(CENTER);
        warn!(cell, "Using fallback move");
        Selection {
            cell,
            reason: Reason::Fallback,
            best_score: None,
            ties: vec![cell],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_takes_center() {
        let mut selector = MoveSelector::new(FirstTieBreaker);
        let selection = selector.choose(&Board::new()).unwrap();
        assert_eq!(selection.cell, CENTER);
        assert_eq!(selection.reason, Reason::Center);
    }

    #[test]
    fn test_full_board_is_rejected() {
        let board = Board::from_pattern("XOX XOO OXX").unwrap();
        let mut selector = MoveSelector::new(FirstTieBreaker);
        assert_eq!(selector.choose(&board), Err(StateError::NoEmptyCells));
    }

    #[test]
    fn test_reply_to_center_is_a_corner() {
        // Player took the center first; only corners hold the draw.
        let board = Board::from_pattern("___ _X_ ___").unwrap();
        let mut selector = MoveSelector::new(FirstTieBreaker);
        let selection = selector.choose(&board).unwrap();
        assert_eq!(selection.reason, Reason::Minimax);
        assert_eq!(selection.best_score, Some(0));
        assert_eq!(selection.ties, vec![0, 2, 6, 8]);
        assert_eq!(selection.cell, 0);
    }

    /// Always picks the last candidate.
    struct LastTieBreaker;

    impl TieBreaker for LastTieBreaker {
        fn pick(&mut self, candidates: &[usize]) -> usize {
            candidates.len() - 1
        }
    }

    /// Returns an index no candidate slice has.
    struct OutOfBoundsTieBreaker;

    impl TieBreaker for OutOfBoundsTieBreaker {
        fn pick(&mut self, candidates: &[usize]) -> usize {
            candidates.len() + 10
        }
    }

    #[test]
    fn test_fallback_prefers_win_then_block() {
        let mut selector = MoveSelector::new(FirstTieBreaker);

        let win = Board::from_pattern("XX_ OO_ X__").unwrap();
        assert_eq!(selector.fallback(&win).cell, 5);

        let block = Board::from_pattern("XX_ _O_ ___").unwrap();
        assert_eq!(selector.fallback(&block).cell, 2);

        let open = Board::from_pattern("X__ _O_ ___").unwrap();
        let selection = selector.fallback(&open);
        assert_eq!(selection.cell, 1);
        assert_eq!(selection.reason, Reason::Fallback);
    }

    #[test]
    fn test_fallback_lets_tie_breaker_pick_empty_cell() {
        let open = Board::from_pattern("X__ _O_ ___").unwrap();
        let mut selector = MoveSelector::new(LastTieBreaker);
        assert_eq!(selector.fallback(&open).cell, 8);

        let mut seeded = MoveSelector::new(RandomTieBreaker::seeded(3));
        let cell = seeded.fallback(&open).cell;
        assert!(open.is_empty(cell));
    }

    #[test]
    fn test_bad_tie_breaker_index_falls_back() {
        // No line is one move from completion for either side.
        let board = Board::from_pattern("X__ _O_ __X").unwrap();
        let mut selector = MoveSelector::new(OutOfBoundsTieBreaker);

        let selection = selector.choose(&board).unwrap();
        assert_eq!(selection.reason, Reason::Fallback);
        assert!(board.is_empty(selection.cell));
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let candidates = [0, 2, 6, 8];
        let mut a = RandomTieBreaker::seeded(7);
        let mut b = RandomTieBreaker::seeded(7);
        for _ in 0..20 {
            let pick = a.pick(&candidates);
            assert!(pick < candidates.len());
            assert_eq!(pick, b.pick(&candidates));
        }
        assert_eq!(a.seed(), 7);
    }
}
