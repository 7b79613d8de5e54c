//! Main menu: hub for starting games and browsing the archive.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::ArchiveService;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::settings::LobbySettings;

/// Menu options available in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    NewGame,
    History,
    Settings,
    Quit,
}

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::History => "Match History",
            Self::Settings => "Settings",
            Self::Quit => "Quit",
        }
    }

    fn all() -> &'static [MenuOption] {
        &[Self::NewGame, Self::History, Self::Settings, Self::Quit]
    }
}

/// State for the main menu.
#[derive(Debug)]
pub struct MainMenuScreen {
    status_line: String,
    list_state: ListState,
}

impl MainMenuScreen {
    /// Creates the main menu, reading the summary counts once.
    #[instrument(skip(archive))]
    pub fn new(settings: LobbySettings, archive: &ArchiveService) -> Self {
        debug!("Initializing MainMenuScreen");
        let settings_text = format!(
            "Difficulty: {}   First: {}",
            settings.difficulty.label(),
            settings.first_player.label()
        );
        let status_line = match archive.summary() {
            Ok(s) => format!(
                "{}   W:{} / L:{} / T:{}   Win rate: {:.1}%",
                settings_text,
                s.human_wins(),
                s.computer_wins(),
                s.ties(),
                s.win_rate()
            ),
            Err(e) => {
                warn!(error = %e, "Summary unavailable");
                settings_text
            }
        };

        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            status_line,
            list_state,
        }
    }

    /// Settings and result counts shown under the title.
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    fn select_previous(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> MenuOption {
        let options = MenuOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for MainMenuScreen {
    #[instrument(skip(self, frame, _archive))]
    fn render(&self, frame: &mut Frame, _archive: &ArchiveService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("Noughts")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let summary_bar = Paragraph::new(self.status_line.as_str())
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(summary_bar, chunks[1]);

        let items: Vec<ListItem> = MenuOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();
        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _archive))]
    fn handle_key(&mut self, key: KeyEvent, _archive: &ArchiveService) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                match option {
                    MenuOption::NewGame => ScreenTransition::GoToNewGame,
                    MenuOption::History => ScreenTransition::GoToHistory,
                    MenuOption::Settings => ScreenTransition::GoToSettings,
                    MenuOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('n') => ScreenTransition::GoToNewGame,
            KeyCode::Char('h') => ScreenTransition::GoToHistory,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
