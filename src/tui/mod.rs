//! Terminal UI for playing against the opponent.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{Action, action_for_key, move_cursor};

use crate::config::GameConfig;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};
use unbeatable_tictactoe::{GameSession, Phase, RandomTieBreaker};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Poll interval while waiting for a key.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Runs the game until the user quits.
#[instrument(skip_all, fields(think_delay_ms = config.think_delay_ms()))]
pub async fn run_tui(config: &GameConfig) -> Result<()> {
    let tie_breaker = match config.seed() {
        Some(seed) => RandomTieBreaker::seeded(*seed),
        None => RandomTieBreaker::from_entropy(),
    };
    info!(seed = tie_breaker.seed(), "Starting terminal game");
    let mut session = GameSession::new(tie_breaker);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_game(&mut terminal, &mut session, config.think_delay()).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(result = %session.result(), "Terminal game finished");
    res
}

/// Draw, read one key, repeat. While the opponent is thinking the loop
/// sleeps instead, then answers for it.
async fn run_game(
    terminal: &mut Tui,
    session: &mut GameSession<RandomTieBreaker>,
    think_delay: Duration,
) -> Result<()> {
    let mut app = App::new();

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if session.phase() == Phase::OpponentThinking {
            sleep(think_delay).await;

            // Keys pressed during the pause reach a session that is still
            // thinking, so cell picks are dropped; quit and reset still work.
            while event::poll(Duration::ZERO)? {
                if !handle_event(event::read()?, session, &mut app) {
                    return Ok(());
                }
            }

            session.opponent_move(&mut app);
            continue;
        }

        if event::poll(INPUT_POLL)? && !handle_event(event::read()?, session, &mut app) {
            return Ok(());
        }
    }
}

/// Applies one terminal event. Returns false when the user quits.
fn handle_event(
    event: Event,
    session: &mut GameSession<RandomTieBreaker>,
    app: &mut App,
) -> bool {
    let Event::Key(key) = event else {
        return true;
    };
    if key.kind != KeyEventKind::Press {
        return true;
    }

    let action = action_for_key(app.cursor(), key.code);
    debug!(?action, "Key pressed");
    match action {
        Action::Quit => {
            info!("User quit");
            return false;
        }
        Action::Reset => session.reset(app),
        Action::Select(pos) => {
            app.set_cursor(pos);
            session.select_cell(pos.to_index(), app);
        }
        Action::MoveCursor(pos) => app.set_cursor(pos),
        Action::None => {}
    }
    true
}
