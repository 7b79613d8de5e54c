//! Win detection.

use crate::board::Board;
use crate::types::{Cell, Side};

/// The eight index triples that win: rows, columns, diagonals.
#[rustfmt::skip]
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],            // Diagonals
];

/// True if any win line is fully occupied by `side`.
pub fn check_winner(board: &Board, side: Side) -> bool {
    let mark = Some(Cell::Occupied(side));
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&i| board.get(i) == mark))
}

/// Returns the side that owns a complete line.
///
/// X is checked before O; legal play never produces both.
pub fn winner(board: &Board) -> Option<Side> {
    [Side::X, Side::O]
        .into_iter()
        .find(|&side| check_winner(board, side))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert!(!check_winner(&board, Side::X));
        assert!(!check_winner(&board, Side::O));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in WIN_LINES {
            let mut board = Board::new();
            for i in line {
                board.apply_move(i, Side::O).unwrap();
            }
            assert!(check_winner(&board, Side::O), "line {:?}", line);
            assert!(!check_winner(&board, Side::X));
        }
    }

    #[test]
    fn test_winner_diagonal() {
        let board = Board::from_snapshot("X O X O X").unwrap();
        assert_eq!(winner(&board), Some(Side::X));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::from_snapshot("XX OO    ").unwrap();
        assert!(!check_winner(&board, Side::X));
        assert!(!check_winner(&board, Side::O));
    }
}
