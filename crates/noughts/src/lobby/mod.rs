//! Lobby system: multi-screen TUI with play, history, replay and settings.

mod controller;
mod screen;
mod screens;
mod settings;

pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
pub use settings::{FirstPlayer, LobbySettings};
