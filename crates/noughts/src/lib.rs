//! Noughts - terminal tic-tac-toe against a minimax opponent
//!
//! Rules and move selection live in [`noughts_engine`]; this crate adds the
//! parts around them.
//!
//! # Architecture
//!
//! - **Session**: [`MatchSession`] pairs a human with a
//!   [`MoveSelector`](noughts_engine::MoveSelector) and writes each move to a [`MatchLog`]
//! - **Database**: [`MatchRepository`] stores matches and moves in SQLite
//! - **Archive**: [`ArchiveService`] rebuilds replays and summary counts
//! - **Lobby**: multi-screen terminal UI driven by [`LobbyController`]
//!
//! # Example
//!
//! ```no_run
//! use noughts::{ArchiveService, MatchRepository};
//! use noughts_engine::{Difficulty, Side};
//!
//! # fn example() -> anyhow::Result<()> {
//! let archive = ArchiveService::new(MatchRepository::open("noughts.db".to_string())?);
//! let mut session = archive.start_session(Difficulty::Hard, Side::X);
//! session.human_move(4)?;
//! let (reply, _outcome) = session.computer_move()?;
//! assert_eq!(reply, 0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod archive_service;
mod config;
mod db;
mod lobby;
mod session;
mod tui;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,noughts=debug";

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Database
pub use db::{
    DbError, GameRecord, MatchRepository, MatchResult, MatchSummary, MoveRecord, NewGameRecord,
    NewMoveRecord,
};

// Crate-level exports - Archive service
pub use archive_service::{ArchiveService, ReplayFrame};

// Crate-level exports - Session
pub use session::{MatchLog, MatchSession, SessionError};

// Crate-level exports - Lobby
pub use lobby::{FirstPlayer, LobbyController, LobbySettings, Screen, ScreenTransition};

// Crate-level exports - Terminal
pub use tui::{LOG_FILE, init_file_logging, run_lobby};
