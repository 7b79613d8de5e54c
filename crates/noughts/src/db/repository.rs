//! Database repository for the match log.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use noughts_engine::{Board, Difficulty, Side};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, MatchResult, MoveRecord, NewGameRecord, NewMoveRecord, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Repository over the SQLite match log.
///
/// Holds only the database path. Every operation opens its own connection
/// and drops it when done, so no handle outlives a unit of work.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    db_path: String,
}

impl MatchRepository {
    /// Creates a repository for the database at the given path.
    ///
    /// Does not touch the file; call [`MatchRepository::run_migrations`] or
    /// use [`MatchRepository::open`] to prepare the schema.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Self {
        info!(path = %db_path, "Creating MatchRepository");
        Self { db_path }
    }

    /// Creates a repository and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path);
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection with foreign keys enforced.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))?;
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        Ok(conn)
    }

    /// Inserts a new match with no winner yet.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn create_game(
        &self,
        difficulty: Difficulty,
        human_side: Side,
    ) -> Result<GameRecord, DbError> {
        debug!("Creating game");
        let mut conn = self.connection()?;

        let new_game = NewGameRecord::new(difficulty.to_string(), human_side.to_string());

        let game = diesel::insert_into(schema::games::table)
            .values(&new_game)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = game.id(), "Game created");
        Ok(game)
    }

    /// Appends one move to a match's log.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the game does not exist or a database error occurs.
    #[instrument(skip(self, board), fields(board = %board.snapshot()))]
    pub fn record_move(
        &self,
        game_id: i32,
        board: &Board,
        side: Side,
        move_number: i32,
    ) -> Result<MoveRecord, DbError> {
        debug!("Recording move");
        let mut conn = self.connection()?;

        let new_move = NewMoveRecord::new(game_id, board.snapshot(), side.to_string(), move_number);

        let record = diesel::insert_into(schema::game_moves::table)
            .values(&new_move)
            .returning(MoveRecord::as_returning())
            .get_result(&mut conn)?;

        debug!(move_id = record.id(), "Move recorded");
        Ok(record)
    }

    /// Sets the final result of a match.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if no such game exists or a database error occurs.
    #[instrument(skip(self))]
    pub fn record_outcome(&self, game_id: i32, result: MatchResult) -> Result<(), DbError> {
        debug!(label = result.to_db_string(), "Recording outcome");
        let mut conn = self.connection()?;

        let updated = diesel::update(schema::games::table.find(game_id))
            .set(schema::games::winner.eq(Some(result.to_db_string())))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(DbError::new(format!("No game with id {}", game_id)));
        }

        info!(game_id, result = %result, "Outcome recorded");
        Ok(())
    }

    /// Looks up a single match. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: i32) -> Result<Option<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let game = schema::games::table
            .find(game_id)
            .select(GameRecord::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(game)
    }

    /// Lists matches, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_matches(&self, limit: i64) -> Result<Vec<GameRecord>, DbError> {
        debug!("Loading recent matches");
        let mut conn = self.connection()?;

        let games = schema::games::table
            .order((schema::games::started_at.desc(), schema::games::id.desc()))
            .limit(limit)
            .select(GameRecord::as_select())
            .load(&mut conn)?;

        info!(count = games.len(), "Recent matches loaded");
        Ok(games)
    }

    /// Lists every match, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn all_matches(&self) -> Result<Vec<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let games = schema::games::table
            .order(schema::games::id.asc())
            .select(GameRecord::as_select())
            .load(&mut conn)?;

        Ok(games)
    }

    /// Loads the moves of one match in play order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn match_details(&self, game_id: i32) -> Result<Vec<MoveRecord>, DbError> {
        debug!("Loading match details");
        let mut conn = self.connection()?;

        let moves = schema::game_moves::table
            .filter(schema::game_moves::game_id.eq(game_id))
            .order(schema::game_moves::move_number.asc())
            .select(MoveRecord::as_select())
            .load(&mut conn)?;

        info!(game_id, count = moves.len(), "Match details loaded");
        Ok(moves)
    }
}
