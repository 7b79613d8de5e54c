//! Core domain types for noughts and crosses.

use serde::{Deserialize, Serialize};

/// One of the two sides in a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Side {
    /// Crosses. Always moves first.
    X,
    /// Noughts.
    O,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Returns the mark character used in board snapshots.
    pub fn symbol(self) -> char {
        match self {
            Side::X => 'X',
            Side::O => 'O',
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Unmarked cell.
    #[default]
    Empty,
    /// Cell marked by a side.
    Occupied(Side),
}

impl Cell {
    /// Returns the snapshot character for this cell (`' '` when empty).
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(side) => side.symbol(),
        }
    }
}

/// Result of a position, always derived from board contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No line is complete and empty cells remain.
    InProgress,
    /// The side completed a line.
    Win(Side),
    /// The board is full and nobody has a line.
    Tie,
}

impl GameOutcome {
    /// Returns true once the game can accept no further moves.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameOutcome::Win(side) => Some(side),
            _ => None,
        }
    }

    /// Label written to the match log when a game finishes.
    ///
    /// Returns `None` for [`GameOutcome::InProgress`].
    pub fn label(self) -> Option<&'static str> {
        match self {
            GameOutcome::InProgress => None,
            GameOutcome::Win(Side::X) => Some("X"),
            GameOutcome::Win(Side::O) => Some("O"),
            GameOutcome::Tie => Some("Tie"),
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Win(side) => write!(f, "Player {} wins", side),
            GameOutcome::Tie => write!(f, "Tie"),
        }
    }
}
