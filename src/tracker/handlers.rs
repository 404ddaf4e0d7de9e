use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use super::types::{CurrentMatchResponse, MatchStartRequest};
use crate::matches::models::MatchRecord;
use crate::matches::types::GoalRequest;
use crate::shared::{AppError, AppState};

#[instrument(skip(state))]
pub async fn start_match(
    State(state): State<AppState>,
    Json(request): Json<MatchStartRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let record = state.tracker.start(request).await?;
    Ok(Json(record))
}

#[instrument(skip(state))]
pub async fn get_current_match(
    State(state): State<AppState>,
) -> Result<Json<CurrentMatchResponse>, AppError> {
    let response = state.tracker.current().await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn toggle_timer(
    State(state): State<AppState>,
) -> Result<Json<CurrentMatchResponse>, AppError> {
    let response = state.tracker.toggle_clock().await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn record_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<CurrentMatchResponse>, AppError> {
    let response = state.tracker.record_goal(request).await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn record_opponent_goal(
    State(state): State<AppState>,
) -> Result<Json<CurrentMatchResponse>, AppError> {
    let response = state.tracker.record_opponent_goal().await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn delete_current_event(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CurrentMatchResponse>, AppError> {
    let response = state.tracker.delete_event(index).await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn finish_match(
    State(state): State<AppState>,
) -> Result<Json<MatchRecord>, AppError> {
    let record = state.tracker.finish().await?;
    Ok(Json(record))
}
