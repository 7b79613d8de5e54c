//! Tie detection.

use crate::board::Board;
use crate::types::{Cell, Side};

use super::win::check_winner;

/// True if every cell is marked.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|&c| c != Cell::Empty)
}

/// True if the board is full and neither side has a line.
///
/// A full board with a line is a win, never a tie.
pub fn is_tie(board: &Board) -> bool {
    is_full(board) && !check_winner(board, Side::X) && !check_winner(board, Side::O)
}
