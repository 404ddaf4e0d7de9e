pub mod cache;
pub mod clock;
mod handlers;
pub mod service;
pub mod types;

pub use handlers::{
    delete_current_event, finish_match, get_current_match, record_goal, record_opponent_goal,
    start_match, toggle_timer,
};
pub use service::TrackerService;
