use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{parse_match_date, MatchRecord, EDIT_TIME_LABEL},
    repository::MatchRepository,
    types::{GoalRequest, MatchListQuery, MatchMetaUpdateRequest},
};
use crate::event::{EventBus, StoreEvent};
use crate::shared::AppError;

/// Service for historical match business logic
///
/// Edits here target finished matches: appended events carry the "Edit"
/// time label and every mutation persists immediately.
pub struct MatchService {
    repository: Arc<dyn MatchRepository + Send + Sync>,
    event_bus: EventBus,
}

impl MatchService {
    pub fn new(repository: Arc<dyn MatchRepository + Send + Sync>, event_bus: EventBus) -> Self {
        Self {
            repository,
            event_bus,
        }
    }

    /// Lists matches newest first, with optional date/range/opponent filters
    #[instrument(skip(self))]
    pub async fn list_matches(&self, query: MatchListQuery) -> Result<Vec<MatchRecord>, AppError> {
        let day = match query.date.as_deref() {
            Some(raw) => Some(
                parse_match_date(raw)
                    .ok_or_else(|| AppError::Validation(format!("Invalid date: {}", raw)))?,
            ),
            None => None,
        };
        let start = match query.start.as_deref() {
            Some(raw) => Some(
                parse_match_date(raw)
                    .ok_or_else(|| AppError::Validation(format!("Invalid start date: {}", raw)))?,
            ),
            None => None,
        };
        let end = match query.end.as_deref() {
            Some(raw) => Some(
                parse_match_date(raw)
                    .ok_or_else(|| AppError::Validation(format!("Invalid end date: {}", raw)))?,
            ),
            None => None,
        };

        let mut records = self.repository.list_matches().await?;
        records.retain(|record| {
            if let Some(opponent) = query.opponent.as_deref() {
                if record.opponent != opponent {
                    return false;
                }
            }
            if day.is_none() && start.is_none() && end.is_none() {
                return true;
            }
            // Records with unparseable dates never match a date filter
            let Some(date) = parse_match_date(&record.date) else {
                return false;
            };
            if let Some(day) = day {
                if date != day {
                    return false;
                }
            }
            if let Some(start) = start {
                if date < start {
                    return false;
                }
            }
            if let Some(end) = end {
                if date > end {
                    return false;
                }
            }
            true
        });

        // Ids embed the creation time, so id order is chronological
        records.sort_by(|a, b| b.id.cmp(&a.id));
        if let Some(limit) = query.limit {
            records.truncate(limit);
        }

        debug!(match_count = records.len(), "Matches listed");
        Ok(records)
    }

    /// Fetches a single match
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str) -> Result<MatchRecord, AppError> {
        self.repository
            .get_match(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Match not found".to_string()))
    }

    /// Edits opponent and/or label on a stored match
    #[instrument(skip(self))]
    pub async fn update_meta(
        &self,
        match_id: &str,
        request: MatchMetaUpdateRequest,
    ) -> Result<MatchRecord, AppError> {
        let mut record = self.get_match(match_id).await?;

        if let Some(opponent) = request.opponent {
            let opponent = opponent.trim().to_string();
            if opponent.is_empty() {
                return Err(AppError::Validation("Opponent cannot be empty".to_string()));
            }
            record.opponent = opponent;
        }
        if let Some(label) = request.label {
            let label = label.trim().to_string();
            record.label = if label.is_empty() { None } else { Some(label) };
        }

        self.repository.upsert_match(&record).await?;
        self.emit_matches().await?;

        info!(match_id = %record.id, "Match metadata updated");
        Ok(record)
    }

    /// Removes a match from history
    #[instrument(skip(self))]
    pub async fn delete_match(&self, match_id: &str) -> Result<(), AppError> {
        self.repository.delete_match(match_id).await?;
        self.emit_matches().await?;

        info!(match_id = %match_id, "Match deleted");
        Ok(())
    }

    /// Appends a goal to a finished match with the "Edit" time label
    #[instrument(skip(self))]
    pub async fn add_goal(
        &self,
        match_id: &str,
        request: GoalRequest,
    ) -> Result<MatchRecord, AppError> {
        if request.scorer_id.trim().is_empty() {
            return Err(AppError::Validation("Scorer id is required".to_string()));
        }

        let mut record = self.get_match(match_id).await?;
        record.record_goal(
            EDIT_TIME_LABEL.to_string(),
            request.scorer_id,
            request.assist_id,
        );

        self.repository.upsert_match(&record).await?;
        self.emit_matches().await?;

        info!(match_id = %record.id, score = record.score_myself, "Goal added to finished match");
        Ok(record)
    }

    /// Appends an opponent goal to a finished match
    #[instrument(skip(self))]
    pub async fn add_opponent_goal(&self, match_id: &str) -> Result<MatchRecord, AppError> {
        let mut record = self.get_match(match_id).await?;
        record.record_opponent_goal(EDIT_TIME_LABEL.to_string());

        self.repository.upsert_match(&record).await?;
        self.emit_matches().await?;

        info!(
            match_id = %record.id,
            score = record.score_opponent,
            "Opponent goal added to finished match"
        );
        Ok(record)
    }

    /// Deletes an event by index, adjusting the score counters
    #[instrument(skip(self))]
    pub async fn delete_event(
        &self,
        match_id: &str,
        index: usize,
    ) -> Result<MatchRecord, AppError> {
        let mut record = self.get_match(match_id).await?;
        record
            .delete_event(index)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        self.repository.upsert_match(&record).await?;
        self.emit_matches().await?;

        info!(match_id = %record.id, index, "Event deleted from match");
        Ok(record)
    }

    async fn emit_matches(&self) -> Result<(), AppError> {
        let mut matches = self.repository.list_matches().await?;
        matches.sort_by(|a, b| b.id.cmp(&a.id));
        self.event_bus
            .emit(StoreEvent::MatchesReplaced { matches })
            .await;
        Ok(())
    }
}
