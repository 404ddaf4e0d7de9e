use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::models::{StatsQuery, StatsSummary};
use super::service::StatsService;
use crate::shared::{AppError, AppState};

#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsSummary>, AppError> {
    let service = StatsService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.match_repository),
    );
    let summary = service.summary(query).await?;
    Ok(Json(summary))
}
