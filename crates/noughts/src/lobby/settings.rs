//! Lobby settings: who opens and how hard the computer plays.

use noughts_engine::{Difficulty, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Which player takes the first move (X) in a new game.
///
/// Defaults to [`FirstPlayer::Human`] so the player moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// The human plays X.
    #[default]
    Human,
    /// The computer plays X.
    Computer,
}

impl FirstPlayer {
    /// Returns the display label for this option.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Player",
            Self::Computer => "Computer",
        }
    }

    /// Toggles between `Human` and `Computer`.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }

    /// The side the human plays under this option.
    pub fn human_side(self) -> Side {
        match self {
            Self::Human => Side::X,
            Self::Computer => Side::O,
        }
    }
}

/// User-configurable settings for the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbySettings {
    /// Strength of the computer opponent.
    pub difficulty: Difficulty,
    /// Who takes the first move in each game.
    pub first_player: FirstPlayer,
}

impl LobbySettings {
    /// Creates settings from explicit values.
    #[instrument]
    pub fn new(difficulty: Difficulty, first_player: FirstPlayer) -> Self {
        Self {
            difficulty,
            first_player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_player_maps_to_side() {
        assert_eq!(FirstPlayer::Human.human_side(), Side::X);
        assert_eq!(FirstPlayer::Computer.human_side(), Side::O);
        assert_eq!(FirstPlayer::Human.toggle(), FirstPlayer::Computer);
        assert_eq!(FirstPlayer::Human.toggle().toggle(), FirstPlayer::Human);
    }
}
