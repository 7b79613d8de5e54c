//! Replay: step through a recorded match one move at a time.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, error, instrument};

use crate::tui::draw_board;
use crate::{ArchiveService, ReplayFrame};

use crate::lobby::screen::{Screen, ScreenTransition};

/// State for the replay screen.
#[derive(Debug)]
pub struct ReplayScreen {
    game_id: i32,
    frames: Vec<ReplayFrame>,
    position: usize,
    load_error: Option<String>,
}

impl ReplayScreen {
    /// Loads the frames of match `game_id`.
    #[instrument(skip(archive))]
    pub fn new(game_id: i32, archive: &ArchiveService) -> Self {
        let (frames, load_error) = match archive.replay(game_id) {
            Ok(frames) => (frames, None),
            Err(e) => {
                error!(error = %e, "Failed to load replay");
                (Vec::new(), Some(e.message))
            }
        };
        debug!(frames = frames.len(), "Initializing ReplayScreen");
        Self {
            game_id,
            frames,
            position: 0,
            load_error,
        }
    }

    fn caption(frame: &ReplayFrame, total: usize) -> String {
        match (frame.side(), frame.cell()) {
            (Some(side), Some(cell)) => format!(
                "Move {}/{}: {} played cell {}",
                frame.move_number(),
                total,
                side,
                cell + 1
            ),
            (Some(side), None) => format!("Move {}/{}: {}", frame.move_number(), total, side),
            _ => format!("Start (0/{})", total),
        }
    }

    fn last(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }
}

impl Screen for ReplayScreen {
    #[instrument(skip(self, frame, _archive))]
    fn render(&self, frame: &mut Frame, _archive: &ArchiveService) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new(format!("Replay of match #{}", self.game_id))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let caption = match (&self.load_error, self.frames.get(self.position)) {
            (Some(message), _) => format!("Could not load replay: {}", message),
            (None, Some(current)) => {
                draw_board(frame, chunks[1], current.board(), None, *current.cell());
                Self::caption(current, self.last())
            }
            (None, None) => "No moves recorded".to_string(),
        };
        let caption = Paragraph::new(caption)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(caption, chunks[2]);

        let help = Paragraph::new("←→: Step | Home/End: Jump | Esc: Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _archive))]
    fn handle_key(&mut self, key: KeyEvent, _archive: &ArchiveService) -> ScreenTransition {
        match key.code {
            KeyCode::Left => {
                self.position = self.position.saturating_sub(1);
                ScreenTransition::Stay
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.position = (self.position + 1).min(self.last());
                ScreenTransition::Stay
            }
            KeyCode::Home => {
                self.position = 0;
                ScreenTransition::Stay
            }
            KeyCode::End => {
                self.position = self.last();
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('b') => ScreenTransition::GoToHistory,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
