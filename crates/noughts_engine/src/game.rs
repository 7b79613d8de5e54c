//! Turn-order state machine for a single game.
//!
//! `InProgress(X)` is the initial state; each non-terminal move hands the
//! turn to the other side; `Win` and `Tie` are absorbing.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::Board;
use crate::error::EngineError;
use crate::types::{GameOutcome, Side};

/// One game of noughts and crosses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Side,
    history: Vec<usize>,
}

impl Game {
    /// Starts a game on an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Side::X,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move. Meaningless once the game is over.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Cells played so far, in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Number of moves played.
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// Outcome derived from the current board.
    pub fn outcome(&self) -> GameOutcome {
        self.board.outcome()
    }

    /// Returns true once a side has won or the board is tied.
    pub fn is_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Plays `index` for the side to move and returns the new outcome.
    ///
    /// Nothing changes when the move is refused.
    ///
    /// # Errors
    ///
    /// - [`EngineError::GameOver`] if the game has already ended.
    /// - [`EngineError::InvalidMove`] if the cell is taken or out of range.
    #[instrument(skip(self), fields(side = %self.to_move, move_number = self.history.len() + 1))]
    pub fn play(&mut self, index: usize) -> Result<GameOutcome, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }

        let side = self.to_move;
        self.board.apply_move(index, side)?;
        self.history.push(index);

        let outcome = self.outcome();
        if !outcome.is_terminal() {
            self.to_move = side.opponent();
        }
        debug!(index, outcome = %outcome, "Move applied");
        Ok(outcome)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.to_move(), Side::X);
        game.play(4).unwrap();
        assert_eq!(game.to_move(), Side::O);
        game.play(0).unwrap();
        assert_eq!(game.to_move(), Side::X);
        assert_eq!(game.history(), &[4, 0]);
        assert_eq!(game.move_number(), 2);
    }

    #[test]
    fn test_rejected_move_keeps_state() {
        let mut game = Game::new();
        game.play(4).unwrap();
        let before = game.clone();
        assert!(matches!(game.play(4), Err(EngineError::InvalidMove { .. })));
        assert!(matches!(game.play(12), Err(EngineError::InvalidMove { .. })));
        assert_eq!(game, before);
    }

    #[test]
    fn test_terminal_state_is_absorbing() {
        let mut game = Game::new();
        for index in [0, 3, 1, 4] {
            assert_eq!(game.play(index), Ok(GameOutcome::InProgress));
        }
        assert_eq!(game.play(2), Ok(GameOutcome::Win(Side::X)));
        assert_eq!(game.to_move(), Side::X);
        assert_eq!(game.play(8), Err(EngineError::GameOver));
        assert_eq!(game.move_number(), 5);
    }
}
