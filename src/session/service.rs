use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::SessionModel,
    repository::SessionRepository,
    token::TokenConfig,
    types::{SessionClaims, SessionCreateRequest, SessionResponse},
};
use crate::shared::AppError;

/// Service for handling session business logic
pub struct SessionService {
    token_config: TokenConfig,
    repository: Arc<dyn SessionRepository + Send + Sync>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository + Send + Sync>) -> Self {
        Self {
            token_config: TokenConfig::new(),
            repository,
        }
    }

    /// Creates a session for the given username and issues its JWT
    #[instrument(skip(self, request))]
    pub async fn create_session(
        &self,
        request: SessionCreateRequest,
    ) -> Result<SessionResponse, AppError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".to_string()));
        }

        // Opportunistic cleanup keeps the store from accumulating
        // sessions that can never validate again
        let removed = self.repository.cleanup_expired_sessions().await?;
        if removed > 0 {
            info!(removed, "Expired sessions removed before creation");
        }

        let session = SessionModel::new(username.clone(), self.token_config.expiration_days);
        self.repository.create_session(&session).await?;

        let token = self
            .token_config
            .create_token(session.id.clone(), username.clone())?;

        info!(username = %username, session_id = %session.id, "Session created");
        Ok(SessionResponse {
            session_id: session.id,
            username,
            token,
        })
    }

    /// Validates a session token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub async fn validate_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        let claims = self.token_config.validate_token(token)?;

        match self.repository.get_session(&claims.session_id).await? {
            Some(mut session) => {
                if session.is_expired() {
                    warn!(session_id = %claims.session_id, "Session has expired");
                    return Err(AppError::Unauthorized("Session has expired".to_string()));
                }

                // Best effort
                session.touch();
                if let Err(e) = self.repository.update_session(&session).await {
                    warn!(error = %e, "Failed to record session access time");
                }

                Ok(claims)
            }
            None => {
                warn!(session_id = %claims.session_id, "Session not found, may have been revoked");
                Err(AppError::Unauthorized(
                    "Session not found or has been revoked".to_string(),
                ))
            }
        }
    }

    /// Revokes a session by removing it from the store
    #[instrument(skip(self))]
    pub async fn revoke_session(&self, session_id: &str) -> Result<(), AppError> {
        self.repository.delete_session(session_id).await?;
        info!(session_id = %session_id, "Session revoked");
        Ok(())
    }
}
