//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_engine::Difficulty;

/// Noughts - tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Terminal tic-tac-toe with a match log and replay", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "noughts.toml")]
    pub config: std::path::PathBuf,

    /// Path to the database file (overrides config)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Computer strength: easy, medium or hard (overrides config)
    #[arg(long, global = true)]
    pub difficulty: Option<Difficulty>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal lobby
    Play,

    /// List recent matches
    History {
        /// Maximum number of matches to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every board of a recorded match
    Replay {
        /// Match id, as shown by `history`
        game_id: i32,
    },
}

/// Where a command sends its logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// The log file, keeping the terminal UI intact.
    File,
    /// Standard error, keeping stdout clean for output.
    Stderr,
}

impl Command {
    /// Log destination for this command.
    pub fn log_target(&self) -> LogTarget {
        match self {
            Self::Play => LogTarget::File,
            Self::History { .. } | Self::Replay { .. } => LogTarget::Stderr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_is_default() {
        let cli = Cli::try_parse_from(["noughts"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, std::path::PathBuf::from("noughts.toml"));
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["noughts", "history", "--json", "--difficulty", "Easy"])
            .unwrap();
        assert_eq!(cli.difficulty, Some(Difficulty::Easy));
        assert_eq!(cli.command, Some(Command::History { limit: 20, json: true }));
    }

    #[test]
    fn test_replay_requires_id() {
        assert!(Cli::try_parse_from(["noughts", "replay"]).is_err());
        let cli = Cli::try_parse_from(["noughts", "replay", "3"]).unwrap();
        assert_eq!(cli.command, Some(Command::Replay { game_id: 3 }));
    }

    #[test]
    fn test_only_play_logs_to_file() {
        assert_eq!(Command::Play.log_target(), LogTarget::File);
        let history = Command::History {
            limit: 5,
            json: false,
        };
        assert_eq!(history.log_target(), LogTarget::Stderr);
        assert_eq!(Command::Replay { game_id: 1 }.log_target(), LogTarget::Stderr);
    }
}
