//! The 3x3 board and its move primitives.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{EngineError, MoveRejection};
use crate::rules;
use crate::types::{Cell, GameOutcome, Side};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// 3x3 board, cells addressed 0-8 in row-major order (`row * 3 + col`).
///
/// Serializes as its snapshot string; deserializing runs the same checks as
/// [`Board::from_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

/// Returns a board with nine empty cells.
pub fn create_board() -> Board {
    Board::new()
}

/// Marks `index` for `side`, failing with [`EngineError::InvalidMove`] if
/// the index is out of range or the cell is taken.
pub fn apply_move(board: &mut Board, index: usize, side: Side) -> Result<(), EngineError> {
    board.apply_move(index, side)
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Gets the cell at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns true if `index` is on the board and unmarked.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Marks the cell at `index` for `side`.
    ///
    /// The board is left untouched when the move is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMove`] if `index > 8` or the cell is
    /// already occupied.
    #[instrument(skip(self), level = "trace")]
    pub fn apply_move(&mut self, index: usize, side: Side) -> Result<(), EngineError> {
        match self.cells.get(index) {
            None => Err(EngineError::InvalidMove {
                index,
                reason: MoveRejection::OutOfRange,
            }),
            Some(Cell::Occupied(_)) => Err(EngineError::InvalidMove {
                index,
                reason: MoveRejection::Occupied,
            }),
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Occupied(side);
                Ok(())
            }
        }
    }

    /// Clears a cell during search backtracking. Caller guarantees `index < 9`.
    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    /// Places a mark during search. Caller guarantees the cell is empty.
    pub(crate) fn place(&mut self, index: usize, side: Side) {
        self.cells[index] = Cell::Occupied(side);
    }

    /// Empty cell indices in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        rules::legal_moves(self)
    }

    /// Number of cells marked by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(side))
            .count()
    }

    /// Total marks on the board.
    pub fn marks_placed(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Side whose turn it is, derived from the mark counts.
    pub fn side_to_move(&self) -> Side {
        if self.count(Side::X) > self.count(Side::O) {
            Side::O
        } else {
            Side::X
        }
    }

    /// True if `side` owns a complete line.
    pub fn check_winner(&self, side: Side) -> bool {
        rules::check_winner(self, side)
    }

    /// The side owning a complete line, X checked first.
    pub fn winner(&self) -> Option<Side> {
        rules::winner(self)
    }

    /// True if no empty cell remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// True if the board is full and nobody has a line.
    pub fn is_tie(&self) -> bool {
        rules::is_tie(self)
    }

    /// Derived outcome of the position.
    pub fn outcome(&self) -> GameOutcome {
        rules::outcome(self)
    }

    /// Encodes the board as a 9-character snapshot (`X`, `O`, or space).
    pub fn snapshot(&self) -> String {
        self.cells.iter().map(|c| c.symbol()).collect()
    }

    /// Decodes a snapshot produced by [`Board::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSnapshot`] for a wrong length, an
    /// unknown character, or mark counts no alternating game can produce.
    #[instrument(level = "debug")]
    pub fn from_snapshot(snapshot: &str) -> Result<Self, EngineError> {
        let chars: Vec<char> = snapshot.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(EngineError::InvalidSnapshot {
                reason: format!("expected {} cells, found {}", CELL_COUNT, chars.len()),
            });
        }

        let mut board = Board::new();
        for (index, ch) in chars.into_iter().enumerate() {
            board.cells[index] = match ch {
                ' ' => Cell::Empty,
                'X' => Cell::Occupied(Side::X),
                'O' => Cell::Occupied(Side::O),
                other => {
                    return Err(EngineError::InvalidSnapshot {
                        reason: format!("unexpected character {:?} at cell {}", other, index),
                    });
                }
            };
        }

        let x = board.count(Side::X);
        let o = board.count(Side::O);
        if x != o && x != o + 1 {
            return Err(EngineError::InvalidSnapshot {
                reason: format!("{} X marks against {} O marks", x, o),
            });
        }

        Ok(board)
    }

    /// Formats the board as a human-readable grid, numbering empty cells 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => result.push_str(&(index + 1).to_string()),
                    Cell::Occupied(side) => result.push(side.symbol()),
                }
                if col < 2 {
                    result.push_str(" | ");
                }
            }
            if row < 2 {
                result.push_str("\n--+---+--\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_snapshot(s)
    }
}

impl TryFrom<String> for Board {
    type Error = EngineError;

    fn try_from(snapshot: String) -> Result<Self, Self::Error> {
        snapshot.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        board.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = create_board();
        assert!(board.cells().iter().all(|&c| c == Cell::Empty));
        assert_eq!(board.marks_placed(), 0);
        assert_eq!(board.side_to_move(), Side::X);
    }

    #[test]
    fn test_apply_move_marks_cell() {
        let mut board = Board::new();
        apply_move(&mut board, 4, Side::X).unwrap();
        assert_eq!(board.get(4), Some(Cell::Occupied(Side::X)));
        assert_eq!(board.side_to_move(), Side::O);
    }

    #[test]
    fn test_apply_move_rejects_occupied() {
        let mut board = Board::new();
        board.apply_move(0, Side::X).unwrap();
        let before = board.clone();
        let err = board.apply_move(0, Side::O).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidMove {
                index: 0,
                reason: MoveRejection::Occupied
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_move_rejects_out_of_range() {
        let mut board = Board::new();
        let err = board.apply_move(9, Side::X).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidMove {
                index: 9,
                reason: MoveRejection::OutOfRange
            }
        ));
    }

    #[test]
    fn test_snapshot_keeps_cells() {
        let board = Board::from_snapshot("XO  X   O").unwrap();
        assert_eq!(board.get(0), Some(Cell::Occupied(Side::X)));
        assert_eq!(board.get(1), Some(Cell::Occupied(Side::O)));
        assert_eq!(board.get(8), Some(Cell::Occupied(Side::O)));
        assert_eq!(board.snapshot(), "XO  X   O");
    }

    #[test]
    fn test_snapshot_rejects_bad_input() {
        assert!(Board::from_snapshot("XO").is_err());
        assert!(Board::from_snapshot("XO  Z    ").is_err());
        // Three X against none cannot come from alternating play.
        assert!(Board::from_snapshot("XXX      ").is_err());
        assert!(Board::from_snapshot("OO  X    ").is_err());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let mut board = Board::new();
        board.apply_move(0, Side::X).unwrap();
        let text = board.display();
        assert!(text.starts_with("X | 2 | 3"));
        assert!(text.ends_with("7 | 8 | 9"));
    }

    #[test]
    fn test_serde_uses_checked_snapshot() {
        let board = Board::from_snapshot("XO  X    ").unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"XO  X    \"");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        assert!(serde_json::from_str::<Board>("\"XXX      \"").is_err());
        assert!(serde_json::from_str::<Board>("\"XO\"").is_err());
        assert!(serde_json::from_str::<Board>("\"XO  Z    \"").is_err());
    }
}
