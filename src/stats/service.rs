use std::sync::Arc;
use tracing::{debug, instrument};

use super::aggregate::aggregate;
use super::models::{StatsQuery, StatsSummary};
use crate::matches::models::parse_match_date;
use crate::matches::repository::MatchRepository;
use crate::roster::repository::PlayerRepository;
use crate::shared::AppError;

/// Service producing per-player stats over match history
pub struct StatsService {
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
    ) -> Self {
        Self {
            player_repository,
            match_repository,
        }
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, query: StatsQuery) -> Result<StatsSummary, AppError> {
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

        let roster = self.player_repository.list_players().await?;
        let matches = self.match_repository.list_matches().await?;
        let summary = aggregate(&roster, &matches, start, end);

        debug!(
            match_count = summary.match_count,
            player_count = summary.players.len(),
            "Stats aggregated"
        );
        Ok(summary)
    }
}
