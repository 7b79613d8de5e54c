//! Application configuration loaded from TOML.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_engine::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::lobby::FirstPlayer;

/// Settings read from `noughts.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite match log.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Strength of the computer opponent.
    #[serde(default)]
    difficulty: Difficulty,

    /// Who plays X in a new game.
    #[serde(default)]
    first_player: FirstPlayer,

    /// Pause before the computer moves, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,
}

fn default_db_path() -> String {
    "noughts.db".to_string()
}

fn default_computer_delay_ms() -> u64 {
    400
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            difficulty: Difficulty::default(),
            first_player: FirstPlayer::default(),
            computer_delay_ms: default_computer_delay_ms(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            db_path = %config.db_path,
            difficulty = %config.difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of file values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        db_path: Option<String>,
        difficulty: Option<Difficulty>,
    ) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default("/nonexistent/noughts.toml").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db_path(), "noughts.db");
        assert_eq!(*config.difficulty(), Difficulty::Hard);
        assert_eq!(*config.first_player(), FirstPlayer::Human);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config("difficulty = \"easy\"\nfirst_player = \"computer\"\n");
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.difficulty(), Difficulty::Easy);
        assert_eq!(*config.first_player(), FirstPlayer::Computer);
        assert_eq!(config.db_path(), "noughts.db");
        assert_eq!(*config.computer_delay_ms(), 400);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = write_config("difficulty = \"impossible\"\n");
        let err = AppConfig::load_or_default(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = AppConfig::default()
            .with_overrides(Some("other.db".to_string()), Some(Difficulty::Medium));
        assert_eq!(config.db_path(), "other.db");
        assert_eq!(*config.difficulty(), Difficulty::Medium);

        let untouched = AppConfig::default().with_overrides(None, None);
        assert_eq!(untouched, AppConfig::default());
    }
}
