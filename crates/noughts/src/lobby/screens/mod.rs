//! Screen implementations for the lobby state machine.

mod history;
mod in_game;
mod main_menu;
mod replay;
mod settings;

pub use history::HistoryScreen;
pub use in_game::InGameScreen;
pub use main_menu::MainMenuScreen;
pub use replay::ReplayScreen;
pub use settings::SettingsScreen;
