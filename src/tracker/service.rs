use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::cache::BlobCache;
use super::clock;
use super::types::{CurrentMatchResponse, MatchStartRequest};
use crate::event::{EventBus, StoreEvent};
use crate::matches::models::{parse_match_date, MatchRecord};
use crate::matches::repository::MatchRepository;
use crate::matches::types::GoalRequest;
use crate::roster::repository::PlayerRepository;
use crate::settings::repository::SettingsRepository;
use crate::shared::AppError;

/// Cache key holding the in-progress match between restarts
const CURRENT_MATCH_KEY: &str = "current-match";

/// Service owning the single live match slot
///
/// All mutations run under one async mutex, so concurrent requests
/// serialize instead of clobbering each other. Every mutation writes
/// the slot through to the blob cache before returning.
pub struct TrackerService {
    current: Mutex<Option<MatchRecord>>,
    cache: Arc<dyn BlobCache + Send + Sync>,
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    event_bus: EventBus,
}

impl TrackerService {
    pub fn new(
        cache: Arc<dyn BlobCache + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            current: Mutex::new(None),
            cache,
            match_repository,
            settings_repository,
            player_repository,
            event_bus,
        }
    }

    /// Restores an unfinished live match from the cache at boot
    #[instrument(skip(self))]
    pub async fn recover(&self) -> Result<(), AppError> {
        let Some(raw) = self.cache.load(CURRENT_MATCH_KEY).await? else {
            debug!("No cached match to recover");
            return Ok(());
        };

        match serde_json::from_str::<MatchRecord>(&raw) {
            Ok(record) if record.is_finished => {
                debug!(match_id = %record.id, "Cached match already finished, skipping");
            }
            Ok(record) => {
                info!(match_id = %record.id, opponent = %record.opponent, "Live match recovered");
                let mut current = self.current.lock().await;
                *current = Some(record);
            }
            Err(e) => {
                warn!(error = %e, "Cached match is unreadable, ignoring");
            }
        }
        Ok(())
    }

    /// Starts a new live match, replacing any current one
    #[instrument(skip(self))]
    pub async fn start(&self, request: MatchStartRequest) -> Result<MatchRecord, AppError> {
        let opponent = request.opponent.trim().to_string();
        if opponent.is_empty() {
            return Err(AppError::Validation("Opponent is required".to_string()));
        }

        let label = request
            .label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        let duration_minutes = match request.duration_minutes {
            Some(0) => {
                return Err(AppError::Validation(
                    "Duration must be at least 1 minute".to_string(),
                ))
            }
            Some(minutes) => minutes,
            None => {
                let settings = self.settings_repository.get_settings().await?;
                settings.unwrap_or_default().default_duration
            }
        };

        let players = match request.players {
            Some(players) => players,
            None => self
                .player_repository
                .list_players()
                .await?
                .into_iter()
                .map(|p| p.id)
                .collect(),
        };

        let date = match request.date.map(|d| d.trim().to_string()) {
            Some(raw) if !raw.is_empty() => {
                if parse_match_date(&raw).is_none() {
                    return Err(AppError::Validation(format!("Invalid date: {}", raw)));
                }
                raw
            }
            _ => MatchRecord::today(),
        };

        let record = MatchRecord::new(opponent, label, duration_minutes, players, date);

        let mut current = self.current.lock().await;
        if let Some(previous) = current.as_ref() {
            warn!(match_id = %previous.id, "Replacing match already in the live slot");
        }
        *current = Some(record.clone());
        self.persist_slot(&record).await?;
        drop(current);

        self.emit_current(Some(record.clone())).await;

        info!(match_id = %record.id, opponent = %record.opponent, "Match started");
        Ok(record)
    }

    /// Snapshot of the live match with its elapsed time label
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<CurrentMatchResponse, AppError> {
        let current = self.current.lock().await;
        let record = current
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No match in progress".to_string()))?
            .clone();
        let elapsed_label = clock::elapsed_label(&record, now_ms());
        Ok(CurrentMatchResponse {
            record,
            elapsed_label,
        })
    }

    /// Pauses or resumes the live match clock
    #[instrument(skip(self))]
    pub async fn toggle_clock(&self) -> Result<CurrentMatchResponse, AppError> {
        let mut current = self.current.lock().await;
        let record = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No match in progress".to_string()))?;

        let now = now_ms();
        clock::toggle(record, now);
        let snapshot = record.clone();
        self.persist_slot(&snapshot).await?;
        drop(current);

        self.emit_current(Some(snapshot.clone())).await;

        info!(match_id = %snapshot.id, is_running = snapshot.is_running, "Clock toggled");
        let elapsed_label = clock::elapsed_label(&snapshot, now);
        Ok(CurrentMatchResponse {
            record: snapshot,
            elapsed_label,
        })
    }

    /// Records a goal for our side at the current clock time
    #[instrument(skip(self))]
    pub async fn record_goal(&self, request: GoalRequest) -> Result<CurrentMatchResponse, AppError> {
        if request.scorer_id.trim().is_empty() {
            return Err(AppError::Validation("Scorer id is required".to_string()));
        }

        let mut current = self.current.lock().await;
        let record = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No match in progress".to_string()))?;

        let now = now_ms();
        let time = clock::elapsed_label(record, now);
        record.record_goal(time, request.scorer_id, request.assist_id);
        let snapshot = record.clone();
        self.persist_slot(&snapshot).await?;
        drop(current);

        self.emit_current(Some(snapshot.clone())).await;

        info!(match_id = %snapshot.id, score = snapshot.score_myself, "Goal recorded");
        let elapsed_label = clock::elapsed_label(&snapshot, now);
        Ok(CurrentMatchResponse {
            record: snapshot,
            elapsed_label,
        })
    }

    /// Records a goal conceded at the current clock time
    #[instrument(skip(self))]
    pub async fn record_opponent_goal(&self) -> Result<CurrentMatchResponse, AppError> {
        let mut current = self.current.lock().await;
        let record = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No match in progress".to_string()))?;

        let now = now_ms();
        let time = clock::elapsed_label(record, now);
        record.record_opponent_goal(time);
        let snapshot = record.clone();
        self.persist_slot(&snapshot).await?;
        drop(current);

        self.emit_current(Some(snapshot.clone())).await;

        info!(match_id = %snapshot.id, score = snapshot.score_opponent, "Opponent goal recorded");
        let elapsed_label = clock::elapsed_label(&snapshot, now);
        Ok(CurrentMatchResponse {
            record: snapshot,
            elapsed_label,
        })
    }

    /// Deletes a live match event by index, adjusting the score
    #[instrument(skip(self))]
    pub async fn delete_event(&self, index: usize) -> Result<CurrentMatchResponse, AppError> {
        let mut current = self.current.lock().await;
        let record = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No match in progress".to_string()))?;

        record
            .delete_event(index)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        let snapshot = record.clone();
        self.persist_slot(&snapshot).await?;
        drop(current);

        self.emit_current(Some(snapshot.clone())).await;

        info!(match_id = %snapshot.id, index, "Live event deleted");
        let elapsed_label = clock::elapsed_label(&snapshot, now_ms());
        Ok(CurrentMatchResponse {
            record: snapshot,
            elapsed_label,
        })
    }

    /// Finishes the live match and moves it into match history
    ///
    /// The finished state is cached before the store write. If the store
    /// rejects it, the slot keeps the finished record so the client can
    /// retry without losing anything.
    #[instrument(skip(self))]
    pub async fn finish(&self) -> Result<MatchRecord, AppError> {
        let mut current = self.current.lock().await;
        let record = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No match in progress".to_string()))?;

        clock::pause(record, now_ms());
        record.is_finished = true;
        let finished = record.clone();
        self.persist_slot(&finished).await?;

        self.match_repository.upsert_match(&finished).await?;

        *current = None;
        if let Err(e) = self.cache.remove(CURRENT_MATCH_KEY).await {
            warn!(error = %e, "Failed to clear cached match after finish");
        }
        drop(current);

        self.emit_current(None).await;
        let mut matches = self.match_repository.list_matches().await?;
        matches.sort_by(|a, b| b.id.cmp(&a.id));
        self.event_bus
            .emit(StoreEvent::MatchesReplaced { matches })
            .await;

        info!(
            match_id = %finished.id,
            score = format!("{}-{}", finished.score_myself, finished.score_opponent),
            "Match finished"
        );
        Ok(finished)
    }

    async fn persist_slot(&self, record: &MatchRecord) -> Result<(), AppError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| AppError::Store(format!("Failed to encode match: {}", e)))?;
        self.cache.save(CURRENT_MATCH_KEY, &raw).await
    }

    async fn emit_current(&self, record: Option<MatchRecord>) {
        self.event_bus
            .emit(StoreEvent::CurrentMatchReplaced { record })
            .await;
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
