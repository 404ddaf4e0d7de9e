use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored state for an issued session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionModel {
    pub id: String, // UUID v4 as string
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl SessionModel {
    /// Creates a new session model with generated ID and timestamps
    pub fn new(username: String, expiration_days: i64) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(expiration_days);

        Self {
            id: Uuid::new_v4().to_string(),
            username,
            created_at: now,
            expires_at,
            last_accessed: Some(now),
        }
    }

    /// Checks if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Updates the last accessed timestamp
    pub fn touch(&mut self) {
        self.last_accessed = Some(Utc::now());
    }
}
