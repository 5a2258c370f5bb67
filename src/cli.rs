//! Command-line interface for unbeatable.

use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Unbeatable - tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Play tic-tac-toe against an opponent that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it is missing)
    #[arg(short, long, global = true, default_value = "unbeatable.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Pause before the opponent moves, in milliseconds
        #[arg(long)]
        think_delay_ms: Option<u64>,

        /// Seed for the opponent's tie-breaking
        #[arg(long)]
        seed: Option<u64>,

        /// File that receives log output
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Score every opponent move on a board and show the pick
    Evaluate {
        /// Nine cells of X, O and _ (or .), row by row, e.g. "XX_OO_X__"
        #[arg(short, long)]
        board: String,

        /// Play X here first: a 0-based cell number or a label like "center"
        #[arg(long)]
        cell: Option<String>,

        /// Seed for the opponent's tie-breaking
        #[arg(long)]
        seed: Option<u64>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Config overrides carried by this command.
    pub fn overrides(&self) -> ConfigOverrides {
        match self {
            Command::Play {
                think_delay_ms,
                seed,
                log_file,
            } => ConfigOverrides {
                think_delay_ms: *think_delay_ms,
                seed: *seed,
                log_file: log_file.clone(),
            },
            Command::Evaluate { seed, .. } => ConfigOverrides {
                seed: *seed,
                ..ConfigOverrides::default()
            },
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            think_delay_ms: None,
            seed: None,
            log_file: None,
        }
    }
}
