//! Terminal rendering with ratatui.

pub mod game_common;
pub mod play_scene;

pub use game_common::{compute_game_layout, GameLayout};
pub use play_scene::render_play_scene;
