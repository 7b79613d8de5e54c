//! Terminal setup and shared rendering helpers for the lobby.

mod input;
mod ui;

pub use input::{digit_cell, move_cursor};
pub use ui::draw_board;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

use crate::{AppConfig, ArchiveService, LobbyController, LobbySettings, MatchRepository};

/// Log file used while the terminal is in raw mode.
pub const LOG_FILE: &str = "noughts.log";

/// Sends logs to [`LOG_FILE`] so they do not tear the screen.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_file_logging() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(crate::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Runs the interactive lobby until the player quits.
///
/// Call [`init_file_logging`] first; the terminal is in raw mode while this runs.
pub async fn run_lobby(config: AppConfig) -> Result<()> {
    info!(db_path = %config.db_path(), "Starting Noughts lobby");

    let repository = MatchRepository::open(config.db_path().clone())?;
    let archive = ArchiveService::new(repository);
    let settings = LobbySettings::new(*config.difficulty(), *config.first_player());
    let delay = Duration::from_millis(*config.computer_delay_ms());
    let mut controller = LobbyController::new(archive, settings, delay);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal).await;

    restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        error!(error = ?err, "Lobby loop error");
    }
    res
}

#[instrument(skip(terminal))]
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
