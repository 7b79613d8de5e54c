//! Game rules for noughts and crosses.
//!
//! Pure functions over a [`Board`]. Nothing here is cached: the board is
//! nine cells, so every query rescans it.

pub mod draw;
pub mod win;

pub use draw::{is_full, is_tie};
pub use win::{WIN_LINES, check_winner, winner};

use crate::board::{Board, CELL_COUNT};
use crate::types::GameOutcome;

/// Indices of empty cells in ascending order.
///
/// The ascending order is what makes the minimax tie-break reproducible.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    (0..CELL_COUNT).filter(|&i| board.is_empty(i)).collect()
}

/// Derives the outcome of a position: wins first, then tie.
pub fn outcome(board: &Board) -> GameOutcome {
    match winner(board) {
        Some(side) => GameOutcome::Win(side),
        None if is_full(board) => GameOutcome::Tie,
        None => GameOutcome::InProgress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn test_legal_moves_ascending() {
        let mut board = Board::new();
        board.apply_move(4, Side::X).unwrap();
        board.apply_move(0, Side::O).unwrap();
        assert_eq!(legal_moves(&board), vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_legal_moves_idempotent() {
        let board = Board::from_snapshot("X O  X  O").unwrap();
        assert_eq!(legal_moves(&board), legal_moves(&board));
    }

    #[test]
    fn test_outcome_progression() {
        let mut board = Board::new();
        assert_eq!(outcome(&board), GameOutcome::InProgress);
        let moves = [(0, Side::X), (3, Side::O), (1, Side::X), (4, Side::O), (2, Side::X)];
        for (index, side) in moves {
            board.apply_move(index, side).unwrap();
        }
        assert_eq!(outcome(&board), GameOutcome::Win(Side::X));
    }

    #[test]
    fn test_full_winning_board_is_win_not_tie() {
        // X X X / O O X / X O O
        let board = Board::from_snapshot("XXXOOXXOO").unwrap();
        assert_eq!(outcome(&board), GameOutcome::Win(Side::X));
        assert!(!is_tie(&board));
    }
}
