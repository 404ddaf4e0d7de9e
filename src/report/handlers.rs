use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

use super::service::ReportService;
use super::types::{ReportKind, ReportQuery};
use crate::shared::{AppError, AppState};

#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let kind = ReportKind::from_str(&kind)
        .map_err(|_| AppError::Validation(format!("Unknown report kind: {}", kind)))?;

    let service = ReportService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.match_repository),
    );
    let text = service.generate(kind, query.date).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response())
}
