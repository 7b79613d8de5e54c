//! Computer move selection: exhaustive minimax plus weaker random tiers.
//!
//! Scores are fixed to O's point of view: an O win is `+1`, an X win is
//! `-1`, a tie is `0`. O maximises and X minimises at every ply, whichever
//! side the computer plays.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::Board;
use crate::error::EngineError;
use crate::types::Side;

/// A root move and its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoredMove {
    /// Cell index of the move.
    pub position: usize,
    /// Minimax value after the move (+1 O wins, -1 X wins, 0 tie).
    pub score: i8,
}

/// Difficulty tier controlling how much randomness is mixed into play.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal moves.
    Easy,
    /// Coin flip each turn between easy and hard.
    Medium,
    /// Always minimax.
    #[default]
    Hard,
}

impl Difficulty {
    /// Display label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Cycles easy -> medium -> hard -> easy.
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }
}

/// Scores every legal move for `side` with full-depth minimax.
///
/// Moves come back in ascending index order.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] if the board is already decided.
#[instrument(skip(board), fields(board = %board.snapshot()))]
pub fn score_moves(board: &Board, side: Side) -> Result<Vec<ScoredMove>, EngineError> {
    if board.outcome().is_terminal() {
        return Err(EngineError::NoLegalMoves);
    }

    // One scratch buffer for the whole search; every ply undoes its mark.
    let mut scratch = board.clone();
    let mut scored = Vec::new();
    for position in board.legal_moves() {
        scratch.place(position, side);
        let score = minimax(&mut scratch, side.opponent());
        scratch.clear(position);
        scored.push(ScoredMove { position, score });
    }
    Ok(scored)
}

/// Returns the optimal cell for `side`.
///
/// Among equally scored moves the lowest index wins.
///
/// # Errors
///
/// Returns [`EngineError::NoLegalMoves`] if the board is already decided.
#[instrument(skip(board), fields(board = %board.snapshot()))]
pub fn best_move(board: &Board, side: Side) -> Result<usize, EngineError> {
    let scored = score_moves(board, side)?;
    let mut best: Option<ScoredMove> = None;
    for candidate in scored {
        if best.is_none_or(|b| improves(side, candidate.score, b.score)) {
            best = Some(candidate);
        }
    }
    let best = best.ok_or(EngineError::NoLegalMoves)?;
    debug!(side = %side, position = best.position, score = best.score, "Minimax chose move");
    Ok(best.position)
}

/// Strict comparison so the first extreme in index order is kept.
fn improves(side: Side, candidate: i8, current: i8) -> bool {
    match side {
        Side::O => candidate > current,
        Side::X => candidate < current,
    }
}

/// Value of the position with `side` to move.
fn minimax(board: &mut Board, side: Side) -> i8 {
    if board.check_winner(Side::O) {
        return 1;
    }
    if board.check_winner(Side::X) {
        return -1;
    }
    if board.is_tie() {
        return 0;
    }

    let mut best: Option<i8> = None;
    for position in board.legal_moves() {
        board.place(position, side);
        let score = minimax(board, side.opponent());
        board.clear(position);
        if best.is_none_or(|b| improves(side, score, b)) {
            best = Some(score);
        }
    }
    best.unwrap_or(0)
}

/// Picks a legal move uniformly at random.
fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<usize, EngineError> {
    if board.outcome().is_terminal() {
        return Err(EngineError::NoLegalMoves);
    }
    board
        .legal_moves()
        .choose(rng)
        .copied()
        .ok_or(EngineError::NoLegalMoves)
}

/// Chooses computer moves according to a [`Difficulty`].
///
/// Owns its random source so callers never share one across games.
#[derive(Debug, Clone)]
pub struct MoveSelector {
    difficulty: Difficulty,
    rng: StdRng,
}

impl MoveSelector {
    /// Creates a selector seeded from the operating system.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a selector with a fixed seed, for reproducible play.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Changes the difficulty for subsequent moves.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Picks a move for `side` under the current difficulty.
    ///
    /// Never mutates `board`; the caller applies the returned index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoLegalMoves`] if the board is already decided.
    #[instrument(skip(self, board), fields(difficulty = %self.difficulty))]
    pub fn select(&mut self, board: &Board, side: Side) -> Result<usize, EngineError> {
        match self.difficulty {
            Difficulty::Easy => random_move(board, &mut self.rng),
            Difficulty::Medium => {
                if self.rng.random_bool(0.5) {
                    debug!("Medium tier using random policy this turn");
                    random_move(board, &mut self.rng)
                } else {
                    debug!("Medium tier using minimax this turn");
                    best_move(board, side)
                }
            }
            Difficulty::Hard => best_move(board, side),
        }
    }
}
