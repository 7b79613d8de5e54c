//! Key handling for board navigation.

use crossterm::event::KeyCode;
use noughts_engine::CELL_COUNT;

/// Moves the cursor one cell in the arrow's direction, stopping at edges.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let (row, col) = (cursor / 3, cursor % 3);
    let (row, col) = match key {
        KeyCode::Up if row > 0 => (row - 1, col),
        KeyCode::Down if row < 2 => (row + 1, col),
        KeyCode::Left if col > 0 => (row, col - 1),
        KeyCode::Right if col < 2 => (row, col + 1),
        _ => (row, col),
    };
    row * 3 + col
}

/// Maps digit keys `1`-`9` to cell indexes `0`-`8`.
pub fn digit_cell(key: KeyCode) -> Option<usize> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|d| (1..=CELL_COUNT).contains(d))
            .map(|d| d - 1),
        _ => None,
    }
}
