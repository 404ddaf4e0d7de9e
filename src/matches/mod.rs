mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use handlers::{
    add_goal, add_opponent_goal, delete_match, delete_match_event, get_match, list_matches,
    update_match_meta,
};
pub use models::{parse_match_date, EventType, MatchOutcome, MatchRecord};
