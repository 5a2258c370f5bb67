//! Unbeatable - command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, instrument};
use unbeatable::{
    Cli, Command, GameConfig, analyze, init_file_logging, init_stderr_logging, play_player_move,
    tui::run_tui,
};
use unbeatable_tictactoe::{Board, MoveSelector, RandomTieBreaker};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let config = GameConfig::load_or_default(&cli.config)?.with_overrides(command.overrides());

    match command {
        Command::Play { .. } => run_play(&config).await,
        Command::Evaluate { board, cell, json, .. } => {
            run_evaluate(&config, &board, cell.as_deref(), json)
        }
    }
}

/// Run the terminal game
async fn run_play(config: &GameConfig) -> Result<()> {
    // Log to a file so output does not draw over the board
    init_file_logging(config.log_file())?;
    info!(log_file = %config.log_file().display(), "Starting unbeatable");
    run_tui(config).await
}

/// Print the analysis of one board
#[instrument(skip(config))]
fn run_evaluate(config: &GameConfig, pattern: &str, cell: Option<&str>, json: bool) -> Result<()> {
    init_stderr_logging();

    let mut board = Board::from_pattern(pattern)
        .with_context(|| format!("Invalid board pattern {pattern:?}"))?;
    if let Some(cell) = cell {
        board = play_player_move(&board, cell)?;
    }
    let tie_breaker = match config.seed() {
        Some(seed) => RandomTieBreaker::seeded(*seed),
        None => RandomTieBreaker::from_entropy(),
    };
    let analysis = analyze(&board, &mut MoveSelector::new(tie_breaker))
        .with_context(|| format!("Cannot analyze board {pattern:?}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{analysis}");
    }
    Ok(())
}
