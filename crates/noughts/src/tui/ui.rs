//! Stateless board rendering.

use noughts_engine::{Board, Cell, Side};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Renders the board centred in `area`.
///
/// `cursor` gets an inverted highlight; `last` (the most recent move) is
/// underlined.
pub fn draw_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<usize>,
    last: Option<usize>,
) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], board, row, cursor, last);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    row: usize,
    cursor: Option<usize>,
    last: Option<usize>,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        draw_cell(frame, cols[col * 2], board, row * 3 + col, cursor, last);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    index: usize,
    cursor: Option<usize>,
    last: Option<usize>,
) {
    let hint = format!(" {} ", index + 1);
    let (symbol, base_style) = match board.get(index) {
        Some(Cell::Occupied(Side::X)) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(Cell::Occupied(Side::O)) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        _ => (hint, Style::default().fg(Color::DarkGray)),
    };

    let mut style = if cursor == Some(index) {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };
    if last == Some(index) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    // Pad to the vertical middle of the 3-line cell.
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(symbol, style))])
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// Returns a `width` x `height` rectangle centred in `area`.
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
