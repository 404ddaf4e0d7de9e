use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::Player,
    service::RosterService,
    types::{PlayerCreateRequest, PlayerUpdateRequest},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for listing the roster
///
/// GET /players
/// Returns players in roster order
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, AppError> {
    let service = RosterService::new(Arc::clone(&state.player_repository), state.event_bus.clone());
    let players = service.list_players().await?;

    info!(player_count = players.len(), "Roster listed successfully");
    Ok(Json(players))
}

/// HTTP handler for adding a roster player
///
/// POST /players
#[instrument(name = "create_player", skip(state))]
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<Json<Player>, AppError> {
    info!(name = %request.name, "Adding player to roster");

    let service = RosterService::new(Arc::clone(&state.player_repository), state.event_bus.clone());
    let player = service.add_player(request).await?;

    Ok(Json(player))
}

/// HTTP handler for editing a roster player
///
/// PUT /players/:id
#[instrument(name = "update_player", skip(state))]
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<PlayerUpdateRequest>,
) -> Result<Json<Player>, AppError> {
    let service = RosterService::new(Arc::clone(&state.player_repository), state.event_bus.clone());
    let player = service.update_player(&player_id, request).await?;

    Ok(Json(player))
}

/// HTTP handler for removing a roster player
///
/// DELETE /players/:id
#[instrument(name = "delete_player", skip(state))]
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = RosterService::new(Arc::clone(&state.player_repository), state.event_bus.clone());
    service.remove_player(&player_id).await?;

    Ok(Json(serde_json::json!({ "deleted": player_id })))
}
