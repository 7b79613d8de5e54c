//! Match session - the loop that pairs a human with the move selector.
//!
//! The session owns one [`Game`], asks the [`MoveSelector`] for computer
//! moves, and writes every move to a [`MatchLog`] between turns. Logging is
//! fire-and-forget: failures are reported through tracing and play goes on.

use derive_more::{Display, Error};
use noughts_engine::{Board, Difficulty, EngineError, Game, GameOutcome, MoveSelector, Side};
use tracing::{debug, info, instrument, warn};

use crate::db::{DbError, MatchRepository, MatchResult};

/// Sink for match records consumed by [`MatchSession`].
pub trait MatchLog {
    /// Opens a new match and returns its id.
    fn begin_match(&self, difficulty: Difficulty, human_side: Side) -> Result<i32, DbError>;

    /// Records the board after `acting_side` made move number `move_number`.
    fn record_move(
        &self,
        game_id: i32,
        board_snapshot: &Board,
        acting_side: Side,
        move_number: i32,
    ) -> Result<(), DbError>;

    /// Records the final result of the match.
    fn record_outcome(&self, game_id: i32, result: MatchResult) -> Result<(), DbError>;
}

impl MatchLog for MatchRepository {
    fn begin_match(&self, difficulty: Difficulty, human_side: Side) -> Result<i32, DbError> {
        Ok(*self.create_game(difficulty, human_side)?.id())
    }

    fn record_move(
        &self,
        game_id: i32,
        board_snapshot: &Board,
        acting_side: Side,
        move_number: i32,
    ) -> Result<(), DbError> {
        MatchRepository::record_move(self, game_id, board_snapshot, acting_side, move_number)
            .map(|_| ())
    }

    fn record_outcome(&self, game_id: i32, result: MatchResult) -> Result<(), DbError> {
        MatchRepository::record_outcome(self, game_id, result)
    }
}

/// Errors from driving a session.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The engine refused the move.
    #[display("{}", _0)]
    Engine(EngineError),

    /// A human move arrived while the computer is to play.
    #[display("It is not your turn")]
    NotYourTurn,

    /// A computer move was requested while the human is to play.
    #[display("It is the human's turn")]
    NotComputerTurn,
}

impl From<EngineError> for SessionError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// One human-versus-computer game plus its logging.
#[derive(Debug)]
pub struct MatchSession<L: MatchLog> {
    log: L,
    game: Game,
    selector: MoveSelector,
    human_side: Side,
    game_id: Option<i32>,
    closed: bool,
}

impl<L: MatchLog> MatchSession<L> {
    /// Starts a fresh game and opens a match in the log.
    ///
    /// If the log cannot open a match the game is still playable; it just
    /// goes unrecorded.
    #[instrument(skip(log, selector), fields(difficulty = %selector.difficulty()))]
    pub fn start(log: L, selector: MoveSelector, human_side: Side) -> Self {
        let game_id = match log.begin_match(selector.difficulty(), human_side) {
            Ok(id) => {
                info!(game_id = id, "Match started");
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Could not open match log; playing unrecorded");
                None
            }
        };

        Self {
            log,
            game: Game::new(),
            selector,
            human_side,
            game_id,
            closed: false,
        }
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Side the human plays.
    pub fn human_side(&self) -> Side {
        self.human_side
    }

    /// Side the computer plays.
    pub fn computer_side(&self) -> Side {
        self.human_side.opponent()
    }

    /// Log id of this match, if one was opened.
    pub fn game_id(&self) -> Option<i32> {
        self.game_id
    }

    /// Difficulty of the computer opponent.
    pub fn difficulty(&self) -> Difficulty {
        self.selector.difficulty()
    }

    /// Returns the underlying log.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// True while the game is live and the human is to move.
    pub fn is_human_turn(&self) -> bool {
        !self.game.is_over() && self.game.to_move() == self.human_side
    }

    /// True while the game is live and the computer is to move.
    pub fn is_computer_turn(&self) -> bool {
        !self.game.is_over() && self.game.to_move() != self.human_side
    }

    /// Plays a validated human move.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotYourTurn`] if the computer is to move.
    /// - [`SessionError::Engine`] if the move is illegal or the game is over.
    #[instrument(skip(self), fields(game_id = ?self.game_id))]
    pub fn human_move(&mut self, index: usize) -> Result<GameOutcome, SessionError> {
        if !self.game.is_over() && !self.is_human_turn() {
            return Err(SessionError::NotYourTurn);
        }
        self.apply(index)
    }

    /// Asks the selector for the computer's move and plays it.
    ///
    /// Returns the chosen cell and the resulting outcome.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotComputerTurn`] if the human is to move.
    /// - [`SessionError::Engine`] if the game is already over.
    #[instrument(skip(self), fields(game_id = ?self.game_id))]
    pub fn computer_move(&mut self) -> Result<(usize, GameOutcome), SessionError> {
        if self.game.is_over() {
            return Err(EngineError::GameOver.into());
        }
        if !self.is_computer_turn() {
            return Err(SessionError::NotComputerTurn);
        }
        let index = self.selector.select(self.game.board(), self.computer_side())?;
        let outcome = self.apply(index)?;
        Ok((index, outcome))
    }

    /// Marks an unfinished match as quit in the log. No-op once finished.
    #[instrument(skip(self), fields(game_id = ?self.game_id))]
    pub fn abandon(&mut self) {
        if self.closed || self.game.is_over() {
            return;
        }
        self.closed = true;
        info!(moves = self.game.move_number(), "Match abandoned");
        if let Some(game_id) = self.game_id
            && let Err(e) = self.log.record_outcome(game_id, MatchResult::Quit)
        {
            warn!(error = %e, "Failed to record quit");
        }
    }

    /// Applies a move and logs it; records the outcome on a terminal move.
    fn apply(&mut self, index: usize) -> Result<GameOutcome, SessionError> {
        let side = self.game.to_move();
        let outcome = self.game.play(index)?;
        let move_number = self.game.move_number() as i32;
        debug!(index, side = %side, move_number, outcome = %outcome, "Move played");

        if let Some(game_id) = self.game_id {
            if let Err(e) = self.log.record_move(game_id, self.game.board(), side, move_number) {
                warn!(error = %e, "Failed to record move");
            }
            if let Some(result) = MatchResult::from_outcome(outcome) {
                self.closed = true;
                if let Err(e) = self.log.record_outcome(game_id, result) {
                    warn!(error = %e, "Failed to record outcome");
                }
            }
        }

        if outcome.is_terminal() {
            info!(outcome = %outcome, moves = move_number, "Match finished");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// In-memory log capturing every call.
    #[derive(Debug, Default)]
    struct RecordingLog {
        moves: RefCell<Vec<(i32, String, Side, i32)>>,
        outcomes: RefCell<Vec<(i32, MatchResult)>>,
        fail_begin: bool,
        fail_record: bool,
        failed_writes: Cell<usize>,
    }

    impl RecordingLog {
        fn reject_write(&self) -> Result<(), DbError> {
            self.failed_writes.set(self.failed_writes.get() + 1);
            Err(DbError::new("disk full"))
        }
    }

    impl MatchLog for RecordingLog {
        fn begin_match(&self, _difficulty: Difficulty, _human_side: Side) -> Result<i32, DbError> {
            if self.fail_begin {
                Err(DbError::new("unavailable"))
            } else {
                Ok(7)
            }
        }

        fn record_move(
            &self,
            game_id: i32,
            board_snapshot: &Board,
            acting_side: Side,
            move_number: i32,
        ) -> Result<(), DbError> {
            if self.fail_record {
                return self.reject_write();
            }
            self.moves
                .borrow_mut()
                .push((game_id, board_snapshot.snapshot(), acting_side, move_number));
            Ok(())
        }

        fn record_outcome(&self, game_id: i32, result: MatchResult) -> Result<(), DbError> {
            if self.fail_record {
                return self.reject_write();
            }
            self.outcomes.borrow_mut().push((game_id, result));
            Ok(())
        }
    }

    fn hard_session(human_side: Side) -> MatchSession<RecordingLog> {
        MatchSession::start(
            RecordingLog::default(),
            MoveSelector::seeded(Difficulty::Hard, 42),
            human_side,
        )
    }

    #[test]
    fn test_every_move_is_logged() {
        let mut session = hard_session(Side::X);
        assert_eq!(session.game_id(), Some(7));
        session.human_move(4).unwrap();
        let (reply, _) = session.computer_move().unwrap();
        assert_eq!(reply, 0);

        let moves = session.log().moves.borrow();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0], (7, "    X    ".to_string(), Side::X, 1));
        assert_eq!(moves[1], (7, "O   X    ".to_string(), Side::O, 2));
        assert!(session.log().outcomes.borrow().is_empty());
    }

    #[test]
    fn test_turn_order_enforced() {
        let mut session = hard_session(Side::X);
        assert!(session.is_human_turn());
        assert_eq!(session.computer_move(), Err(SessionError::NotComputerTurn));
        session.human_move(0).unwrap();
        assert_eq!(session.human_move(1), Err(SessionError::NotYourTurn));
    }

    #[test]
    fn test_computer_opens_when_human_plays_o() {
        let mut session = hard_session(Side::O);
        assert!(session.is_computer_turn());
        let (index, outcome) = session.computer_move().unwrap();
        assert_eq!(index, 0);
        assert_eq!(outcome, GameOutcome::InProgress);
        assert!(session.is_human_turn());
    }

    #[test]
    fn test_finished_game_logs_outcome_once() {
        let mut session = hard_session(Side::X);
        // Human plays the losing edge line; the computer converts.
        while !session.game().is_over() {
            if session.is_human_turn() {
                let index = session.game().board().legal_moves()[0];
                session.human_move(index).unwrap();
            } else {
                session.computer_move().unwrap();
            }
        }
        let total_moves = session.game().move_number();
        assert_eq!(session.log().moves.borrow().len(), total_moves);
        assert_eq!(session.log().outcomes.borrow().len(), 1);

        session.abandon();
        assert_eq!(session.log().outcomes.borrow().len(), 1);
        assert!(matches!(
            session.human_move(0),
            Err(SessionError::Engine(EngineError::GameOver))
        ));
    }

    #[test]
    fn test_abandon_records_quit() {
        let mut session = hard_session(Side::X);
        session.human_move(4).unwrap();
        session.abandon();
        session.abandon();
        assert_eq!(*session.log().outcomes.borrow(), vec![(7, MatchResult::Quit)]);
    }

    #[test]
    fn test_invalid_move_is_not_logged() {
        let mut session = hard_session(Side::X);
        session.human_move(4).unwrap();
        session.computer_move().unwrap();
        assert!(matches!(
            session.human_move(4),
            Err(SessionError::Engine(EngineError::InvalidMove { .. }))
        ));
        assert_eq!(session.log().moves.borrow().len(), 2);
    }

    #[test]
    fn test_unrecorded_session_still_plays() {
        let log = RecordingLog {
            fail_begin: true,
            ..RecordingLog::default()
        };
        let mut session =
            MatchSession::start(log, MoveSelector::seeded(Difficulty::Easy, 1), Side::X);
        assert_eq!(session.game_id(), None);
        session.human_move(4).unwrap();
        session.computer_move().unwrap();
        assert!(session.log().moves.borrow().is_empty());
    }

    #[test]
    fn test_failed_writes_do_not_stop_play() {
        let log = RecordingLog {
            fail_record: true,
            ..RecordingLog::default()
        };
        let mut session =
            MatchSession::start(log, MoveSelector::seeded(Difficulty::Hard, 5), Side::X);
        assert_eq!(session.game_id(), Some(7));

        let mut outcome = GameOutcome::InProgress;
        while !outcome.is_terminal() {
            outcome = if session.is_human_turn() {
                let index = session.game().board().legal_moves()[0];
                session.human_move(index).expect("human move despite log failure")
            } else {
                session.computer_move().expect("computer move despite log failure").1
            };
        }
        assert_eq!(session.game().outcome(), outcome);

        // Every move plus the outcome was attempted once.
        let attempts = session.game().move_number() + 1;
        assert_eq!(session.log().failed_writes.get(), attempts);
        assert!(session.log().moves.borrow().is_empty());

        session.abandon();
        assert_eq!(session.log().failed_writes.get(), attempts);
    }
}
