use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::types::{SessionClaims, SessionCreateRequest, SessionResponse};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new session
///
/// POST /session
/// Returns the session id, username and a JWT to present as Bearer token
#[instrument(name = "create_session", skip(state, request))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<SessionCreateRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.session_service.create_session(request).await?;

    info!(
        username = %session.username,
        session_id = %session.session_id,
        "Session created successfully"
    );

    Ok(Json(session))
}

/// HTTP handler revoking the caller's own session
///
/// DELETE /session (requires auth)
#[instrument(name = "revoke_session", skip(state, claims))]
pub async fn revoke_session(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Value>, AppError> {
    state
        .session_service
        .revoke_session(&claims.session_id)
        .await?;

    Ok(Json(json!({ "revoked": claims.session_id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::jwt_auth;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::{delete, post},
        Router,
    };
    use tower::ServiceExt;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn router(state: AppState) -> Router {
            let authed = Router::new()
                .route("/session", delete(revoke_session))
                .layer(middleware::from_fn_with_state(state.clone(), jwt_auth));
            Router::new()
                .route("/session", post(create_session))
                .merge(authed)
                .with_state(state)
        }

        pub async fn create(app: Router, username: &str) -> (StatusCode, Option<SessionResponse>) {
            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/session")
                        .header("content-type", "application/json")
                        .body(Body::from(format!(r#"{{"username":"{}"}}"#, username)))
                        .unwrap(),
                )
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).ok())
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_create_session_handler() {
        let state = AppStateBuilder::new().build();

        let (status, session) = create(router(state), "coach").await;

        assert_eq!(status, StatusCode::OK);
        let session = session.unwrap();
        assert_eq!(session.username, "coach");
        assert!(session.token.contains('.'));
    }

    #[tokio::test]
    async fn test_create_session_rejects_blank_username() {
        let state = AppStateBuilder::new().build();

        let (status, _) = create(router(state), "  ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_revoke_own_session() {
        let state = AppStateBuilder::new().build();
        let (_, session) = create(router(state.clone()), "coach").await;
        let token = session.unwrap().token;

        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/session")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The token no longer authenticates
        let response = router(state)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/session")
                    .header("Authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_revoke_without_token_is_unauthorized() {
        let state = AppStateBuilder::new().build();

        let response = router(state)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
