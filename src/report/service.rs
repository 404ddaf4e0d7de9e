use chrono::Local;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::formatter::{csv_report, detail_report, simple_report, EMPTY_DAY_MESSAGE};
use super::types::ReportKind;
use crate::matches::models::parse_match_date;
use crate::matches::repository::MatchRepository;
use crate::roster::repository::PlayerRepository;
use crate::shared::AppError;

/// Service rendering one day's matches as a shareable report
pub struct ReportService {
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
}

impl ReportService {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
    ) -> Self {
        Self {
            player_repository,
            match_repository,
        }
    }

    /// Renders the report for the given day, defaulting to today
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        kind: ReportKind,
        date: Option<String>,
    ) -> Result<String, AppError> {
        let target = match date.as_deref() {
            Some(raw) => parse_match_date(raw)
                .ok_or_else(|| AppError::Validation(format!("Invalid date: {}", raw)))?,
            None => Local::now().date_naive(),
        };

        let mut matches = self.match_repository.list_matches().await?;
        matches.retain(|m| parse_match_date(&m.date) == Some(target));
        if matches.is_empty() {
            debug!(%target, "No matches on report day");
            return Ok(EMPTY_DAY_MESSAGE.to_string());
        }
        // Oldest first, ids embed creation time
        matches.sort_by(|a, b| a.id.cmp(&b.id));

        let roster = self.player_repository.list_players().await?;
        let text = match kind {
            ReportKind::Simple => simple_report(target, &matches, &roster),
            ReportKind::Detail => detail_report(&matches, &roster),
            ReportKind::Csv => csv_report(&matches),
        };

        debug!(%kind, match_count = matches.len(), "Report generated");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::models::MatchRecord;
    use crate::matches::repository::InMemoryMatchRepository;
    use crate::roster::repository::InMemoryPlayerRepository;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn service(matches: Vec<MatchRecord>) -> ReportService {
            ReportService::new(
                Arc::new(InMemoryPlayerRepository::new()),
                Arc::new(InMemoryMatchRepository::with_matches(matches)),
            )
        }

        pub fn match_on(id: &str, date: &str, opponent: &str) -> MatchRecord {
            MatchRecord {
                id: id.to_string(),
                date: date.to_string(),
                opponent: opponent.to_string(),
                label: None,
                duration_minutes: 20,
                players: vec![],
                score_myself: 0,
                score_opponent: 0,
                events: vec![],
                accumulated_ms: 0,
                last_resume_ms: None,
                is_running: false,
                is_finished: true,
            }
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_empty_day_message_for_every_kind() {
        let service = service(vec![match_on("m_1", "2024-06-01", "FC X")]);

        for kind in [ReportKind::Simple, ReportKind::Detail, ReportKind::Csv] {
            let text = service
                .generate(kind, Some("2024-06-02".to_string()))
                .await
                .unwrap();
            assert_eq!(text, "該当する試合記録はありません。");
        }
    }

    #[tokio::test]
    async fn test_day_filter_matches_equivalent_date_formats() {
        let service = service(vec![match_on("m_1", "2024/6/1", "FC X")]);

        let text = service
            .generate(ReportKind::Csv, Some("2024-06-01".to_string()))
            .await
            .unwrap();
        assert!(text.contains("m_1,2024/6/1,,FC X,0,0,Draw"));
    }

    #[tokio::test]
    async fn test_matches_render_oldest_first() {
        let service = service(vec![
            match_on("m_200", "2024-06-01", "FC B"),
            match_on("m_100", "2024-06-01", "FC A"),
        ]);

        let text = service
            .generate(ReportKind::Csv, Some("2024-06-01".to_string()))
            .await
            .unwrap();
        let first = text.find("m_100").unwrap();
        let second = text.find("m_200").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_rejects_unparseable_date_param() {
        let service = service(vec![]);

        let result = service
            .generate(ReportKind::Simple, Some("tomorrow".to_string()))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
