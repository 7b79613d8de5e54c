//! Match history: recent games, newest first.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};
use tracing::{debug, error, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::{ArchiveService, GameRecord};

/// How many matches the table loads.
const HISTORY_LIMIT: i64 = 50;

/// State for the history screen.
#[derive(Debug)]
pub struct HistoryScreen {
    games: Vec<GameRecord>,
    selected: usize,
    load_error: Option<String>,
}

impl HistoryScreen {
    /// Loads recent matches from the archive.
    #[instrument(skip(archive))]
    pub fn new(archive: &ArchiveService) -> Self {
        let (games, load_error) = match archive.recent_matches(HISTORY_LIMIT) {
            Ok(games) => (games, None),
            Err(e) => {
                error!(error = %e, "Failed to load match history");
                (Vec::new(), Some(e.message))
            }
        };
        debug!(count = games.len(), "Initializing HistoryScreen");
        Self {
            games,
            selected: 0,
            load_error,
        }
    }

    fn result_label(game: &GameRecord) -> String {
        match game.result() {
            Ok(Some(result)) => result.to_string(),
            Ok(None) => "Unfinished".to_string(),
            Err(_) => "?".to_string(),
        }
    }
}

impl Screen for HistoryScreen {
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

        let title = Paragraph::new("Match History")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        if let Some(message) = &self.load_error {
            let body = Paragraph::new(format!("Could not load history: {}", message))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(body, chunks[1]);
        } else if self.games.is_empty() {
            let body = Paragraph::new("No matches yet. Play one from the menu.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(body, chunks[1]);
        } else {
            let rows: Vec<Row> = self
                .games
                .iter()
                .map(|g| {
                    Row::new(vec![
                        g.id().to_string(),
                        g.started_at().format("%Y-%m-%d %H:%M").to_string(),
                        g.difficulty().clone(),
                        g.human_side().clone(),
                        Self::result_label(g),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Length(6),
                    Constraint::Length(18),
                    Constraint::Length(10),
                    Constraint::Length(6),
                    Constraint::Min(10),
                ],
            )
            .header(
                Row::new(vec!["#", "Started", "Level", "You", "Result"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().borders(Borders::ALL))
            .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
            let mut state = TableState::default().with_selected(Some(self.selected));
            frame.render_stateful_widget(table, chunks[1], &mut state);
        }

        let help = Paragraph::new("↑↓: Navigate | Enter: Replay | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _archive))]
    fn handle_key(&mut self, key: KeyEvent, _archive: &ArchiveService) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                if self.selected + 1 < self.games.len() {
                    self.selected += 1;
                }
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.games.get(self.selected) {
                Some(game) => {
                    info!(game_id = game.id(), "Opening replay");
                    ScreenTransition::GoToReplay { game_id: *game.id() }
                }
                None => ScreenTransition::Stay,
            },
            KeyCode::Esc | KeyCode::Char('b') => ScreenTransition::GoToMainMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
