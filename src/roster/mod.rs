// Public API - what other modules can use
pub use handlers::{create_player, delete_player, list_players, update_player};
pub use models::{display_name, Player, OWN_GOAL_ID, OWN_GOAL_NAME, UNKNOWN_NAME};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
