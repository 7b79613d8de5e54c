//! Settings screen: difficulty and who goes first.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::ArchiveService;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::settings::LobbySettings;

const ROW_DIFFICULTY: usize = 0;
const ROW_FIRST_PLAYER: usize = 1;
const ROW_COUNT: usize = 2;

/// State for the settings screen.
#[derive(Debug)]
pub struct SettingsScreen {
    settings: LobbySettings,
    list_state: ListState,
}

impl SettingsScreen {
    /// Creates a new settings screen pre-populated with the current settings.
    #[instrument(skip(settings))]
    pub fn new(settings: LobbySettings) -> Self {
        debug!("Initializing SettingsScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(ROW_DIFFICULTY));
        Self {
            settings,
            list_state,
        }
    }

    /// Returns the current settings (called by the controller on transition out).
    pub fn settings(&self) -> LobbySettings {
        self.settings
    }

    /// Changes the value on the selected row.
    #[instrument(skip(self))]
    fn toggle_selected(&mut self) {
        match self.list_state.selected().unwrap_or(ROW_DIFFICULTY) {
            ROW_FIRST_PLAYER => {
                self.settings.first_player = self.settings.first_player.toggle();
                info!(first_player = %self.settings.first_player.label(), "Toggled first player");
            }
            _ => {
                self.settings.difficulty = self.settings.difficulty.next();
                info!(difficulty = %self.settings.difficulty, "Changed difficulty");
            }
        }
    }

    fn move_selection(&mut self) {
        let next = (self.list_state.selected().unwrap_or(0) + 1) % ROW_COUNT;
        self.list_state.select(Some(next));
    }
}

impl Screen for SettingsScreen {
    #[instrument(skip(self, frame, _archive))]
    fn render(&self, frame: &mut Frame, _archive: &ArchiveService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Settings")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items = vec![
            ListItem::new(format!("Difficulty         [ {} ]", self.settings.difficulty.label())),
            ListItem::new(format!("Who Goes First?    [ {} ]", self.settings.first_player.label())),
        ];
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Preferences"))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[1], &mut list_state);

        let help = Paragraph::new("↑↓: Select | ←→ / Enter: Change | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _archive))]
    fn handle_key(&mut self, key: KeyEvent, _archive: &ArchiveService) -> ScreenTransition {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                self.move_selection();
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.toggle_selected();
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                info!("Leaving settings screen");
                ScreenTransition::GoToMainMenu
            }
            _ => ScreenTransition::Stay,
        }
    }
}
