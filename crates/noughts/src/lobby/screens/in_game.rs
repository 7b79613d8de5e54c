//! In-game screen: the human plays the computer on a live board.
//!
//! Human moves are validated against the legal moves before they reach the
//! session. Computer replies are scheduled on [`Screen::tick`] after a short
//! delay so the player can see each move land.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use noughts_engine::{GameOutcome, Side};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::session::MatchSession;
use crate::tui::{digit_cell, draw_board, move_cursor};
use crate::{ArchiveService, MatchRepository};

/// State for a game in progress.
#[derive(Debug)]
pub struct InGameScreen {
    session: MatchSession<MatchRepository>,
    cursor: usize,
    last_move: Option<usize>,
    status: String,
    computer_delay: Duration,
    computer_due: Option<Instant>,
}

impl InGameScreen {
    /// Wraps a freshly started session.
    #[instrument(skip(session), fields(game_id = ?session.game_id()))]
    pub fn new(session: MatchSession<MatchRepository>, computer_delay: Duration) -> Self {
        debug!("Initializing InGameScreen");
        let mut screen = Self {
            session,
            cursor: 4,
            last_move: None,
            status: String::new(),
            computer_delay,
            computer_due: None,
        };
        screen.prompt();
        screen
    }

    /// Sets the status line for the side to move, scheduling the computer if needed.
    fn prompt(&mut self) {
        if self.session.is_computer_turn() {
            self.status = "Computer is thinking…".to_string();
            self.computer_due = Some(Instant::now() + self.computer_delay);
        } else if self.session.is_human_turn() {
            self.status = format!(
                "Your move ({}): 1-9 or arrows + Enter",
                self.session.human_side()
            );
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        let human = self.session.human_side();
        self.status = match outcome {
            GameOutcome::Win(side) if side == human => "You win!".to_string(),
            GameOutcome::Win(_) => "Computer wins.".to_string(),
            _ => "Tie game.".to_string(),
        };
        self.status.push_str("  Enter: play again | Esc: menu");
        self.computer_due = None;
    }

    /// Tries the human move at `index`, re-prompting on rejection.
    #[instrument(skip(self))]
    fn try_human_move(&mut self, index: usize) {
        if !self.session.is_human_turn() {
            return;
        }
        if !self.session.game().board().legal_moves().contains(&index) {
            debug!(index, "Rejected occupied cell");
            self.status = format!("Cell {} is taken, pick another", index + 1);
            return;
        }

        match self.session.human_move(index) {
            Ok(outcome) => {
                self.last_move = Some(index);
                self.cursor = index;
                if outcome.is_terminal() {
                    self.finish(outcome);
                } else {
                    self.prompt();
                }
            }
            Err(e) => {
                warn!(error = %e, "Human move rejected");
                self.status = e.to_string();
            }
        }
    }

    fn leave(&mut self, transition: ScreenTransition) -> ScreenTransition {
        self.session.abandon();
        info!(transition = ?transition, "Leaving game");
        transition
    }

    fn side_name(&self, side: Side) -> &'static str {
        if side == self.session.human_side() { "You" } else { "Computer" }
    }
}

impl Screen for InGameScreen {
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

        let title = format!(
            "Noughts  |  {}  |  X: {}  O: {}  |  Move {}",
            self.session.difficulty().label(),
            self.side_name(Side::X),
            self.side_name(Side::O),
            self.session.game().move_number()
        );
        let title = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let cursor = self.session.is_human_turn().then_some(self.cursor);
        draw_board(frame, chunks[1], self.session.game().board(), cursor, self.last_move);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new("r: Restart | Esc: Menu | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _archive))]
    fn handle_key(&mut self, key: KeyEvent, _archive: &ArchiveService) -> ScreenTransition {
        if self.session.game().is_over() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('r') => ScreenTransition::GoToNewGame,
                KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
                _ => ScreenTransition::GoToMainMenu,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.try_human_move(self.cursor);
                ScreenTransition::Stay
            }
            KeyCode::Char('r') => self.leave(ScreenTransition::GoToNewGame),
            KeyCode::Esc | KeyCode::Char('b') => self.leave(ScreenTransition::GoToMainMenu),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.leave(ScreenTransition::Quit),
            code => {
                if let Some(index) = digit_cell(code) {
                    self.try_human_move(index);
                }
                ScreenTransition::Stay
            }
        }
    }

    fn tick(&mut self) -> ScreenTransition {
        let Some(due) = self.computer_due else {
            return ScreenTransition::Stay;
        };
        if Instant::now() < due {
            return ScreenTransition::Stay;
        }
        self.computer_due = None;

        match self.session.computer_move() {
            Ok((index, outcome)) => {
                self.last_move = Some(index);
                if outcome.is_terminal() {
                    self.finish(outcome);
                } else {
                    self.prompt();
                }
            }
            Err(e) => {
                warn!(error = %e, "Computer move failed");
                self.status = e.to_string();
            }
        }
        ScreenTransition::Stay
    }
}
