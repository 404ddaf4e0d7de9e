pub mod aggregate;
mod handlers;
pub mod models;
pub mod service;

pub use aggregate::aggregate;
pub use handlers::get_stats;
pub use models::{PlayerStatLine, StatsQuery, StatsSummary};
pub use service::StatsService;
