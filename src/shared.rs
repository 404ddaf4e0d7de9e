use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::event::EventBus;
use crate::matches::repository::MatchRepository;
use crate::roster::repository::PlayerRepository;
use crate::session::repository::SessionRepository;
use crate::session::service::SessionService;
use crate::settings::repository::SettingsRepository;
use crate::tracker::service::TrackerService;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    pub match_repository: Arc<dyn MatchRepository + Send + Sync>,
    pub settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
    pub session_repository: Arc<dyn SessionRepository + Send + Sync>,
    pub session_service: Arc<SessionService>,
    pub tracker: Arc<TrackerService>,
    pub event_bus: EventBus,
}

impl AppState {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
        session_repository: Arc<dyn SessionRepository + Send + Sync>,
        session_service: Arc<SessionService>,
        tracker: Arc<TrackerService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            player_repository,
            match_repository,
            settings_repository,
            session_repository,
            session_service,
            tracker,
            event_bus,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal server error")]
    Internal,
}

/// Millisecond timestamp for time-derived record ids ("p_<millis>",
/// "m_<millis>"). Bumped past the previous value so two records created
/// within the same millisecond stay unique.
pub(crate) fn unique_id_millis() -> i64 {
    static LAST: AtomicI64 = AtomicI64::new(0);
    let now = Utc::now().timestamp_millis();
    match LAST.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        Some(if now > last { now } else { last + 1 })
    }) {
        Ok(prev) => {
            if now > prev {
                now
            } else {
                prev + 1
            }
        }
        Err(_) => now,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Store(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Store error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
