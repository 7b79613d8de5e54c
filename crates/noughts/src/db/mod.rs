//! Database persistence layer for the match log.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameRecord, MatchResult, MatchSummary, MoveRecord, NewGameRecord, NewMoveRecord};
pub use repository::MatchRepository;
