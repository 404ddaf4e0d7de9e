use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::MatchRecord;
use crate::shared::AppError;

/// Trait for the historical match collection
///
/// Records are stored as opaque documents keyed by id; nothing in the
/// store interprets their fields. Listing order is unspecified, callers
/// sort by id.
#[async_trait]
pub trait MatchRepository {
    /// Inserts or replaces a record by id
    async fn upsert_match(&self, record: &MatchRecord) -> Result<(), AppError>;
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchRecord>, AppError>;
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError>;
    async fn delete_match(&self, match_id: &str) -> Result<(), AppError>;
    async fn upsert_matches(&self, records: &[MatchRecord]) -> Result<(), AppError>;
}

/// In-memory implementation of MatchRepository for development and testing
pub struct InMemoryMatchRepository {
    matches: Mutex<HashMap<String, MatchRecord>>,
}

impl Default for InMemoryMatchRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryMatchRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            matches: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated matches
    pub fn with_matches(records: Vec<MatchRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            map.insert(record.id.clone(), record);
        }
        Self {
            matches: Mutex::new(map),
        }
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    #[instrument(skip(self, record))]
    async fn upsert_match(&self, record: &MatchRecord) -> Result<(), AppError> {
        debug!(match_id = %record.id, opponent = %record.opponent, "Upserting match in memory");

        let mut matches = self.matches.lock().unwrap();
        matches.insert(record.id.clone(), record.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchRecord>, AppError> {
        debug!(match_id = %match_id, "Fetching match from memory");

        let matches = self.matches.lock().unwrap();
        let record = matches.get(match_id).cloned();

        match &record {
            Some(r) => debug!(match_id = %match_id, opponent = %r.opponent, "Match found in memory"),
            None => debug!(match_id = %match_id, "Match not found in memory"),
        }

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
        debug!("Listing all matches in memory");

        let matches = self.matches.lock().unwrap();
        Ok(matches.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, match_id: &str) -> Result<(), AppError> {
        debug!(match_id = %match_id, "Deleting match from memory");

        let mut matches = self.matches.lock().unwrap();
        if matches.remove(match_id).is_none() {
            warn!(match_id = %match_id, "Match not found for deletion in memory");
            return Err(AppError::NotFound("Match not found".to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self, records))]
    async fn upsert_matches(&self, records: &[MatchRecord]) -> Result<(), AppError> {
        debug!(count = records.len(), "Upserting matches in memory");

        let mut matches = self.matches.lock().unwrap();
        for record in records {
            matches.insert(record.id.clone(), record.clone());
        }

        Ok(())
    }
}

/// PostgreSQL implementation storing each match as an opaque JSON document
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode(doc: &str) -> Result<MatchRecord, AppError> {
        serde_json::from_str(doc).map_err(|e| {
            warn!(error = %e, "Failed to decode match document");
            AppError::Store(e.to_string())
        })
    }

    fn encode(record: &MatchRecord) -> Result<String, AppError> {
        serde_json::to_string(record).map_err(|e| {
            warn!(error = %e, "Failed to encode match document");
            AppError::Store(e.to_string())
        })
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    #[instrument(skip(self, record))]
    async fn upsert_match(&self, record: &MatchRecord) -> Result<(), AppError> {
        debug!(match_id = %record.id, "Upserting match in database");

        let doc = Self::encode(record)?;
        sqlx::query(
            "INSERT INTO match_documents (id, doc) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET doc = $2",
        )
        .bind(&record.id)
        .bind(&doc)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, match_id = %record.id, "Failed to upsert match in database");
            AppError::Store(e.to_string())
        })?;

        debug!(match_id = %record.id, "Match upserted successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: &str) -> Result<Option<MatchRecord>, AppError> {
        debug!(match_id = %match_id, "Fetching match from database");

        let row = sqlx::query("SELECT doc FROM match_documents WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, match_id = %match_id, "Failed to fetch match from database");
                AppError::Store(e.to_string())
            })?;

        match row {
            Some(row) => {
                let doc: String = row.get("doc");
                Ok(Some(Self::decode(&doc)?))
            }
            None => {
                debug!(match_id = %match_id, "Match not found in database");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
        debug!("Listing all matches from database");

        let rows = sqlx::query("SELECT doc FROM match_documents")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list matches from database");
                AppError::Store(e.to_string())
            })?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let doc: String = row.get("doc");
            records.push(Self::decode(&doc)?);
        }

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn delete_match(&self, match_id: &str) -> Result<(), AppError> {
        debug!(match_id = %match_id, "Deleting match from database");

        let result = sqlx::query("DELETE FROM match_documents WHERE id = $1")
            .bind(match_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, match_id = %match_id, "Failed to delete match from database");
                AppError::Store(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(match_id = %match_id, "Match not found for deletion");
            return Err(AppError::NotFound("Match not found".to_string()));
        }

        Ok(())
    }

    /// Batch upsert inside one transaction: either every record lands
    /// or none do.
    #[instrument(skip(self, records))]
    async fn upsert_matches(&self, records: &[MatchRecord]) -> Result<(), AppError> {
        debug!(count = records.len(), "Upserting match batch in database");

        let mut tx = self.pool.begin().await.map_err(|e| {
            warn!(error = %e, "Failed to open match batch transaction");
            AppError::Store(e.to_string())
        })?;

        for record in records {
            let doc = Self::encode(record)?;
            sqlx::query(
                "INSERT INTO match_documents (id, doc) VALUES ($1, $2) \
                 ON CONFLICT (id) DO UPDATE SET doc = $2",
            )
            .bind(&record.id)
            .bind(&doc)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                warn!(error = %e, match_id = %record.id, "Failed to upsert match in batch");
                AppError::Store(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Failed to commit match batch");
            AppError::Store(e.to_string())
        })?;

        Ok(())
    }
}
