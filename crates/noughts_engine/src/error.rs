//! Engine error types.

use derive_more::{Display, Error};

/// Why a move was refused by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveRejection {
    /// Index outside 0-8.
    #[display("index out of range (must be 0-8)")]
    OutOfRange,
    /// Target cell already holds a mark.
    #[display("cell is already occupied")]
    Occupied,
}

/// Errors surfaced by the board, selector, and game state machine.
///
/// None of these are transient: each one is a caller error that the
/// driving loop must prevent or report.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The target cell is occupied or the index is out of range.
    #[display("Invalid move at {index}: {reason}")]
    InvalidMove {
        /// Requested cell index.
        index: usize,
        /// Why the board refused it.
        reason: MoveRejection,
    },

    /// The selector was asked to move on a finished board.
    #[display("No legal moves: the game is already decided")]
    NoLegalMoves,

    /// A move was played after the game reached a terminal state.
    #[display("Game is already over")]
    GameOver,

    /// A stored board snapshot could not be decoded.
    #[display("Invalid board snapshot: {reason}")]
    InvalidSnapshot {
        /// What was wrong with the snapshot.
        reason: String,
    },
}
