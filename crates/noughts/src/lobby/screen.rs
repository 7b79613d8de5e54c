//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::ArchiveService;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the main menu.
    GoToMainMenu,
    /// Start a fresh game with the current settings.
    GoToNewGame,
    /// Navigate to the match history table.
    GoToHistory,
    /// Step through a recorded match.
    GoToReplay {
        /// Id of the match to replay.
        game_id: i32,
    },
    /// Navigate to the settings screen.
    GoToSettings,
    /// Exit the lobby application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own state, renders its UI, and handles key events.
/// The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, archive: &ArchiveService);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, archive: &ArchiveService) -> ScreenTransition;

    /// Advances time-driven state once per loop iteration.
    fn tick(&mut self) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
