//! Lobby controller: the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Terminal, backend::Backend};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::ArchiveService;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{
    HistoryScreen, InGameScreen, MainMenuScreen, ReplayScreen, SettingsScreen,
};
use crate::lobby::settings::LobbySettings;

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    MainMenu(MainMenuScreen),
    InGame(Box<InGameScreen>),
    History(HistoryScreen),
    Replay(ReplayScreen),
    Settings(SettingsScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::InGame(s) => s.as_ref(),
            Self::History(s) => s,
            Self::Replay(s) => s,
            Self::Settings(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::MainMenu(s) => s,
            Self::InGame(s) => s.as_mut(),
            Self::History(s) => s,
            Self::Replay(s) => s,
            Self::Settings(s) => s,
        }
    }
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    archive: ArchiveService,
    settings: LobbySettings,
    computer_delay: Duration,
}

impl LobbyController {
    /// Creates a new lobby controller.
    #[instrument(skip(archive))]
    pub fn new(archive: ArchiveService, settings: LobbySettings, computer_delay: Duration) -> Self {
        info!("Creating LobbyController");
        Self {
            archive,
            settings,
            computer_delay,
        }
    }

    /// Runs the lobby event loop until the user quits.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let mut screen = ActiveScreen::MainMenu(MainMenuScreen::new(self.settings, &self.archive));

        loop {
            terminal.draw(|f| screen.as_screen().render(f, &self.archive))?;

            let mut transition = screen.as_screen_mut().tick();

            // Poll for input with short timeout to keep the loop responsive.
            if transition == ScreenTransition::Stay
                && event::poll(Duration::from_millis(50))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                transition = screen.as_screen_mut().handle_key(key, &self.archive);
            }

            screen = match self.apply_transition(transition, screen) {
                Some(next) => next,
                None => {
                    info!("Lobby quitting");
                    return Ok(());
                }
            };

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        if transition != ScreenTransition::Stay {
            debug!(transition = ?transition, "Applying screen transition");
        }
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToMainMenu => {
                if let Some(updated) = Self::extract_settings_from_screen(&current) {
                    debug!(
                        difficulty = %updated.difficulty,
                        first_player = %updated.first_player.label(),
                        "Saving updated settings"
                    );
                    self.settings = updated;
                }
                info!("Navigating to MainMenu");
                Some(ActiveScreen::MainMenu(MainMenuScreen::new(self.settings, &self.archive)))
            }

            ScreenTransition::GoToNewGame => {
                let human_side = self.settings.first_player.human_side();
                info!(
                    difficulty = %self.settings.difficulty,
                    human_side = %human_side,
                    "Starting new game"
                );
                let session = self.archive.start_session(self.settings.difficulty, human_side);
                let screen = InGameScreen::new(session, self.computer_delay);
                Some(ActiveScreen::InGame(Box::new(screen)))
            }

            ScreenTransition::GoToHistory => {
                info!("Navigating to History");
                Some(ActiveScreen::History(HistoryScreen::new(&self.archive)))
            }

            ScreenTransition::GoToReplay { game_id } => {
                info!(game_id, "Navigating to Replay");
                Some(ActiveScreen::Replay(ReplayScreen::new(game_id, &self.archive)))
            }

            ScreenTransition::GoToSettings => {
                info!("Navigating to Settings");
                Some(ActiveScreen::Settings(SettingsScreen::new(self.settings)))
            }

            ScreenTransition::Quit => None,
        }
    }

    /// Extracts updated settings from the settings screen when navigating away.
    fn extract_settings_from_screen(screen: &ActiveScreen) -> Option<LobbySettings> {
        match screen {
            ActiveScreen::Settings(s) => Some(s.settings()),
            _ => None,
        }
    }
}
