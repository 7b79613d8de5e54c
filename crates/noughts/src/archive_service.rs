//! Match archive business logic layer.

use derive_getters::Getters;
use derive_new::new;
use noughts_engine::{Board, Cell, Difficulty, MoveSelector, Side};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, GameRecord, MatchRepository, MatchResult, MatchSummary};
use crate::session::MatchSession;

/// One step of a replay: the board after `move_number` moves.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ReplayFrame {
    move_number: i32,
    side: Option<Side>,
    cell: Option<usize>,
    board: Board,
}

/// Service layer over the match log.
///
/// Wraps [`MatchRepository`] with session creation, replay decoding, and
/// summary statistics.
#[derive(Debug, Clone)]
pub struct ArchiveService {
    repository: MatchRepository,
}

impl ArchiveService {
    /// Creates a new archive service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: MatchRepository) -> Self {
        info!("Creating ArchiveService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &MatchRepository {
        &self.repository
    }

    /// Starts a logged session against a computer at `difficulty`.
    #[instrument(skip(self))]
    pub fn start_session(
        &self,
        difficulty: Difficulty,
        human_side: Side,
    ) -> MatchSession<MatchRepository> {
        let selector = MoveSelector::new(difficulty);
        MatchSession::start(self.repository.clone(), selector, human_side)
    }

    /// Returns recent matches, newest first.
    #[instrument(skip(self))]
    pub fn recent_matches(&self, limit: i64) -> Result<Vec<GameRecord>, DbError> {
        self.repository.recent_matches(limit)
    }

    /// Rebuilds a match move by move.
    ///
    /// Frame 0 is the empty board; each later frame carries the cell that
    /// changed from the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the match does not exist or a stored snapshot
    /// is corrupt.
    #[instrument(skip(self))]
    pub fn replay(&self, game_id: i32) -> Result<Vec<ReplayFrame>, DbError> {
        if self.repository.get_game(game_id)?.is_none() {
            return Err(DbError::new(format!("No game with id {}", game_id)));
        }

        let moves = self.repository.match_details(game_id)?;
        let mut frames = Vec::with_capacity(moves.len() + 1);
        frames.push(ReplayFrame::new(0, None, None, Board::new()));

        let mut previous = Board::new();
        for record in &moves {
            let board = record.board()?;
            let cell = changed_cell(&previous, &board);
            if cell.is_none() {
                warn!(move_number = record.move_number(), "Snapshot does not add exactly one mark");
            }
            frames.push(ReplayFrame::new(
                *record.move_number(),
                Some(record.acting_side()?),
                cell,
                board.clone(),
            ));
            previous = board;
        }

        debug!(frames = frames.len(), "Replay built");
        Ok(frames)
    }

    /// Counts results from the human player's point of view.
    #[instrument(skip(self))]
    pub fn summary(&self) -> Result<MatchSummary, DbError> {
        let games = self.repository.all_matches()?;

        let mut human_wins = 0;
        let mut computer_wins = 0;
        let mut ties = 0;
        let mut unfinished = 0;

        for game in &games {
            match game.result()? {
                Some(MatchResult::Won(side)) if side == game.human()? => human_wins += 1,
                Some(MatchResult::Won(_)) => computer_wins += 1,
                Some(MatchResult::Tie) => ties += 1,
                Some(MatchResult::Quit) | None => unfinished += 1,
            }
        }

        let total = games.len() as i32;
        let summary = MatchSummary::new(total, human_wins, computer_wins, ties, unfinished);
        info!(
            total = summary.total_games(),
            human_wins,
            computer_wins,
            ties,
            unfinished,
            win_rate = %format!("{:.1}%", summary.win_rate()),
            "Summary computed"
        );
        Ok(summary)
    }
}

/// The single cell that went from empty to marked, if exactly one did.
fn changed_cell(before: &Board, after: &Board) -> Option<usize> {
    let mut changed = before
        .cells()
        .iter()
        .zip(after.cells())
        .enumerate()
        .filter(|(_, (b, a))| **b == Cell::Empty && **a != Cell::Empty)
        .map(|(i, _)| i);
    let first = changed.next()?;
    changed.next().is_none().then_some(first)
}
