use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::instrument;

use super::service::BackupService;
use super::types::{BackupDocument, ImportResponse};
use crate::shared::{AppError, AppState};

#[instrument(skip(state))]
pub async fn export_backup(
    State(state): State<AppState>,
) -> Result<Json<BackupDocument>, AppError> {
    let service = BackupService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.match_repository),
        Arc::clone(&state.settings_repository),
        state.event_bus.clone(),
    );
    let document = service.export().await?;
    Ok(Json(document))
}

#[instrument(skip(state, document))]
pub async fn import_backup(
    State(state): State<AppState>,
    Json(document): Json<BackupDocument>,
) -> Result<Json<ImportResponse>, AppError> {
    let service = BackupService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.match_repository),
        Arc::clone(&state.settings_repository),
        state.event_bus.clone(),
    );
    let response = service.import(document).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn router(state: AppState) -> Router {
            Router::new()
                .route("/backup/export", get(export_backup))
                .route("/backup/import", post(import_backup))
                .with_state(state)
        }

        pub async fn body_json(response: axum::response::Response) -> Value {
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_import_then_export_round_trip() {
        let state = AppStateBuilder::new().build();

        let backup = r#"{
            "playerMaster": [{"id": "p_1", "name": "Alice", "number": "10"}],
            "matches": [],
            "settings": {"myTeamName": "FC US", "defaultDuration": 25}
        }"#;

        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/backup/import")
                    .header("content-type", "application/json")
                    .body(Body::from(backup))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["imported"], 2);

        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/backup/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["playerMaster"][0]["name"], "Alice");
        assert_eq!(json["settings"]["myTeamName"], "FC US");
        assert_eq!(json["matches"].as_array().unwrap().len(), 0);
    }
}
