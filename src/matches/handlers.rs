use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::instrument;

use super::models::MatchRecord;
use super::service::MatchService;
use super::types::{GoalRequest, MatchListQuery, MatchMetaUpdateRequest};
use crate::shared::{AppError, AppState};

#[instrument(skip(state))]
pub async fn list_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    let matches = service.list_matches(query).await?;
    Ok(Json(matches))
}

#[instrument(skip(state))]
pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchRecord>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    let record = service.get_match(&match_id).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn update_match_meta(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<MatchMetaUpdateRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    let record = service.update_meta(&match_id, request).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    service.delete_match(&match_id).await?;
    Ok(Json(json!({ "deleted": match_id })))
}

#[instrument(skip(state))]
pub async fn add_goal(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    let record = service.add_goal(&match_id, request).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn add_opponent_goal(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchRecord>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    let record = service.add_opponent_goal(&match_id).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn delete_match_event(
    State(state): State<AppState>,
    Path((match_id, index)): Path<(String, usize)>,
) -> Result<Json<MatchRecord>, AppError> {
    let service = MatchService::new(
        Arc::clone(&state.match_repository),
        state.event_bus.clone(),
    );
    let record = service.delete_event(&match_id, index).await?;
    Ok(Json(record))
}
