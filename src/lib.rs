//! Unbeatable - terminal tic-tac-toe against a minimax opponent
//!
//! The game rules and the opponent live in `unbeatable_tictactoe`; this
//! crate adds the command line, configuration, logging and the terminal UI.
//!
//! # Architecture
//!
//! - **Config**: TOML file merged with command-line overrides
//! - **TUI**: ratatui front end driving a
//!   [`GameSession`](unbeatable_tictactoe::GameSession)
//! - **Analysis**: scores every opponent move on a given board
//!
//! # Example
//!
//! ```
//! use unbeatable::analyze;
//! use unbeatable_tictactoe::{Board, FirstTieBreaker, MoveSelector};
//!
//! let board = Board::from_pattern("XX_ OO_ X__").unwrap();
//! let analysis = analyze(&board, &mut MoveSelector::new(FirstTieBreaker)).unwrap();
//! assert_eq!(analysis.selection.as_ref().map(|s| s.cell), Some(5));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analysis;
mod cli;
mod config;
mod logging;
pub mod tui;

// Crate-level exports - Analysis
pub use analysis::{Analysis, analyze, play_player_move};

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigOverrides, GameConfig};

// Crate-level exports - Logging
pub use logging::{init_file_logging, init_stderr_logging};
