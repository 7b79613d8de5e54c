//! Database models and domain types.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use noughts_engine::{Board, Difficulty, GameOutcome, Side};
use serde::Serialize;
use tracing::instrument;

use crate::db::{DbError, schema};

/// One match row: who played which side, at what difficulty, and how it ended.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::games)]
pub struct GameRecord {
    id: i32,
    winner: Option<String>,
    difficulty: String,
    human_side: String,
    started_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored winner label. `None` means the match never finished.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn result(&self) -> Result<Option<MatchResult>, DbError> {
        self.winner
            .as_deref()
            .map(MatchResult::from_db_string)
            .transpose()
    }

    /// Parses the stored human side.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn human(&self) -> Result<Side, DbError> {
        Side::from_str(&self.human_side)
            .map_err(|_| DbError::new(format!("Invalid side: '{}'", self.human_side)))
    }

    /// Parses the stored difficulty tier.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn difficulty_level(&self) -> Result<Difficulty, DbError> {
        Difficulty::from_str(&self.difficulty)
            .map_err(|_| DbError::new(format!("Invalid difficulty: '{}'", self.difficulty)))
    }
}

/// Insertable match row; `winner` starts NULL and `started_at` defaults to now.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    difficulty: String,
    human_side: String,
}

/// One logged move: the board after the move and who made it.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::game_moves)]
#[diesel(belongs_to(GameRecord, foreign_key = game_id))]
pub struct MoveRecord {
    id: i32,
    game_id: i32,
    board_state: String,
    side: String,
    move_number: i32,
}

impl MoveRecord {
    /// Decodes the stored board snapshot.
    #[instrument(skip(self), fields(move_id = self.id))]
    pub fn board(&self) -> Result<Board, DbError> {
        Ok(Board::from_snapshot(&self.board_state)?)
    }

    /// Parses the side that made this move.
    #[instrument(skip(self), fields(move_id = self.id))]
    pub fn acting_side(&self) -> Result<Side, DbError> {
        Side::from_str(&self.side)
            .map_err(|_| DbError::new(format!("Invalid side: '{}'", self.side)))
    }
}

/// Insertable move row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_moves)]
pub struct NewMoveRecord {
    game_id: i32,
    board_state: String,
    side: String,
    move_number: i32,
}

/// How a match ended, as written to the `winner` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchResult {
    /// The side completed a line.
    Won(Side),
    /// Board filled with no line.
    Tie,
    /// The player left before the game ended.
    Quit,
}

impl MatchResult {
    /// Converts a finished [`GameOutcome`]; `None` while still in progress.
    pub fn from_outcome(outcome: GameOutcome) -> Option<Self> {
        match outcome {
            GameOutcome::InProgress => None,
            GameOutcome::Win(side) => Some(Self::Won(side)),
            GameOutcome::Tie => Some(Self::Tie),
        }
    }

    /// Converts the result to the string stored in the database.
    #[instrument]
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Won(Side::X) => "X",
            Self::Won(Side::O) => "O",
            Self::Tie => "Tie",
            Self::Quit => "QUIT",
        }
    }

    /// Parses the result from the string stored in the database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a valid result label.
    #[instrument(skip(s), fields(s = %s))]
    pub fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "X" => Ok(Self::Won(Side::X)),
            "O" => Ok(Self::Won(Side::O)),
            "Tie" => Ok(Self::Tie),
            "QUIT" => Ok(Self::Quit),
            _ => Err(DbError::new(format!("Invalid result: '{}'", s))),
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won(side) => write!(f, "{} won", side),
            Self::Tie => write!(f, "Tie"),
            Self::Quit => write!(f, "Quit"),
        }
    }
}

/// Match counts from the human player's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize)]
pub struct MatchSummary {
    total_games: i32,
    human_wins: i32,
    computer_wins: i32,
    ties: i32,
    unfinished: i32,
}

impl MatchSummary {
    /// Creates a new summary.
    #[instrument]
    pub fn new(
        total_games: i32,
        human_wins: i32,
        computer_wins: i32,
        ties: i32,
        unfinished: i32,
    ) -> Self {
        Self {
            total_games,
            human_wins,
            computer_wins,
            ties,
            unfinished,
        }
    }

    /// Human win rate over finished games, as a percentage (0.0–100.0).
    #[instrument(skip(self))]
    pub fn win_rate(&self) -> f64 {
        let decided = self.human_wins + self.computer_wins + self.ties;
        if decided == 0 {
            0.0
        } else {
            (self.human_wins as f64 / decided as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_labels_round_trip() {
        for result in [
            MatchResult::Won(Side::X),
            MatchResult::Won(Side::O),
            MatchResult::Tie,
            MatchResult::Quit,
        ] {
            assert_eq!(MatchResult::from_db_string(result.to_db_string()).ok(), Some(result));
        }
        assert!(MatchResult::from_db_string("draw").is_err());
    }

    #[test]
    fn test_result_from_outcome() {
        assert_eq!(MatchResult::from_outcome(GameOutcome::InProgress), None);
        assert_eq!(MatchResult::from_outcome(GameOutcome::Tie), Some(MatchResult::Tie));
        assert_eq!(
            MatchResult::from_outcome(GameOutcome::Win(Side::O)),
            Some(MatchResult::Won(Side::O))
        );
    }

    #[test]
    fn test_win_rate_ignores_unfinished() {
        let summary = MatchSummary::new(5, 1, 2, 1, 1);
        assert!((summary.win_rate() - 25.0).abs() < f64::EPSILON);
        assert_eq!(MatchSummary::default().win_rate(), 0.0);
    }
}
