//! Pure tic-tac-toe game logic with an exhaustive minimax opponent.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid, placement rules, win and draw checks
//! - **Search**: minimax over the full game tree
//! - **Selector**: center opening, otherwise a random pick among the best
//!   minimax moves
//! - **Session**: the turn state machine a presentation layer drives
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{FirstTieBreaker, GameSession, Phase, Status};
//!
//! let mut session = GameSession::new(FirstTieBreaker);
//! session.select_cell(0, &mut ());
//! assert_eq!(session.phase(), Phase::OpponentThinking);
//!
//! session.opponent_move(&mut ());
//! assert_eq!(session.status(), Status::PlayersTurn);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
pub mod invariants;
mod position;
mod rules;
pub mod search;
mod selector;
mod session;
mod types;

pub use board::{Board, CELLS, CENTER, LINES};
pub use error::{MoveError, PatternError, StateError};
pub use position::Position;
pub use rules::{GameResult, completing_cell};
pub use search::{MoveScore, evaluate, score_moves};
pub use selector::{FirstTieBreaker, MoveSelector, RandomTieBreaker, Reason, Selection, TieBreaker};
pub use session::{GameSession, Ignored, Phase, SessionObserver, Status, Transition};
pub use types::{Side, Square};
