//! Noughts engine - tic-tac-toe rules and minimax move selection.
//!
//! # Architecture
//!
//! - **Board**: fixed 3x3 grid with move primitives and snapshot encoding
//! - **Rules**: win lines, tie detection, legal-move enumeration
//! - **Selector**: full-depth minimax plus easy/medium random tiers
//! - **Game**: turn-order state machine composing the above
//!
//! # Example
//!
//! ```
//! use noughts_engine::{Game, GameOutcome, Side, best_move};
//!
//! let mut game = Game::new();
//! game.play(4)?;
//! let reply = best_move(game.board(), Side::O)?;
//! assert_eq!(game.play(reply)?, GameOutcome::InProgress);
//! # Ok::<(), noughts_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
mod rules;
mod selector;
mod types;

pub use board::{Board, CELL_COUNT, apply_move, create_board};
pub use error::{EngineError, MoveRejection};
pub use game::Game;
pub use rules::{WIN_LINES, check_winner, is_full, is_tie, legal_moves, outcome, winner};
pub use selector::{Difficulty, MoveSelector, ScoredMove, best_move, score_moves};
pub use types::{Cell, GameOutcome, Side};
