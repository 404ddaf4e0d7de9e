use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

use super::{models::Settings, service::SettingsService};
use crate::shared::{AppError, AppState};

/// HTTP handler for reading settings
///
/// GET /settings
/// Stored values merged over defaults
#[instrument(name = "get_settings", skip(state))]
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, AppError> {
    let service = SettingsService::new(
        Arc::clone(&state.settings_repository),
        state.event_bus.clone(),
    );
    let settings = service.get_settings().await?;

    Ok(Json(settings))
}

/// HTTP handler for replacing settings
///
/// PUT /settings
#[instrument(name = "update_settings", skip(state))]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    let service = SettingsService::new(
        Arc::clone(&state.settings_repository),
        state.event_bus.clone(),
    );
    let settings = service.update_settings(settings).await?;

    Ok(Json(settings))
}
