// Library crate for the matchday team server
// This file exposes the public API for integration tests

pub mod backup;
pub mod event;
pub mod matches;
pub mod notify;
pub mod report;
pub mod roster;
pub mod session;
pub mod settings;
pub mod shared;
pub mod stats;
pub mod tracker;

// Re-export commonly used types for easier access in tests
pub use event::{EventBus, StoreEvent};
pub use matches::MatchRecord;
pub use roster::Player;
pub use settings::Settings;
pub use shared::{AppError, AppState};

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the full application router over the given state
///
/// Reads and live-match tracking are open. Writes to the durable
/// collections sit behind the session middleware: pitch-side logging
/// must never stall on a login screen, while roster edits, history
/// edits and imports stay gated.
pub fn router(state: AppState) -> Router {
    let authed = Router::new()
        .route("/session", delete(session::revoke_session))
        .route("/players", post(roster::create_player))
        .route(
            "/players/:id",
            put(roster::update_player).delete(roster::delete_player),
        )
        .route("/settings", put(settings::update_settings))
        .route(
            "/matches/:id",
            patch(matches::update_match_meta).delete(matches::delete_match),
        )
        .route("/matches/:id/goals", post(matches::add_goal))
        .route(
            "/matches/:id/opponent-goals",
            post(matches::add_opponent_goal),
        )
        .route(
            "/matches/:id/events/:index",
            delete(matches::delete_match_event),
        )
        .route("/match/finish", post(tracker::finish_match))
        .route("/backup/import", post(backup::import_backup))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::jwt_auth,
        ));

    Router::new()
        .route("/", get(|| async { "matchday server" }))
        .route("/session", post(session::create_session))
        .route("/players", get(roster::list_players))
        .route("/settings", get(settings::get_settings))
        .route("/matches", get(matches::list_matches))
        .route("/matches/:id", get(matches::get_match))
        .route("/match/current", get(tracker::get_current_match))
        .route("/match/start", post(tracker::start_match))
        .route("/match/timer/toggle", post(tracker::toggle_timer))
        .route("/match/goals", post(tracker::record_goal))
        .route("/match/opponent-goals", post(tracker::record_opponent_goal))
        .route("/match/events/:index", delete(tracker::delete_current_event))
        .route("/stats", get(stats::get_stats))
        .route("/reports/:kind", get(report::get_report))
        .route("/backup/export", get(backup::export_backup))
        .route("/ws", get(notify::ws_handler))
        .merge(authed)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
