use std::sync::Arc;
use tracing::{info, instrument};

use super::types::{BackupDocument, ImportResponse};
use crate::event::{EventBus, StoreEvent};
use crate::matches::repository::MatchRepository;
use crate::roster::repository::PlayerRepository;
use crate::settings::repository::SettingsRepository;
use crate::shared::AppError;

/// Service for whole-store export and import
pub struct BackupService {
    player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
    event_bus: EventBus,
}

impl BackupService {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        settings_repository: Arc<dyn SettingsRepository + Send + Sync>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            player_repository,
            match_repository,
            settings_repository,
            event_bus,
        }
    }

    /// Snapshot of every durable collection
    #[instrument(skip(self))]
    pub async fn export(&self) -> Result<BackupDocument, AppError> {
        let players = self.player_repository.list_players().await?;
        let matches = self.match_repository.list_matches().await?;
        let settings = self
            .settings_repository
            .get_settings()
            .await?
            .unwrap_or_default();

        info!(
            player_count = players.len(),
            match_count = matches.len(),
            "Backup exported"
        );
        Ok(BackupDocument {
            player_master: Some(players),
            matches: Some(matches),
            settings: Some(settings),
        })
    }

    /// Merges a backup document into the store as one batch
    ///
    /// Existing records with matching ids are overwritten, everything
    /// else is left alone. The count mirrors what was written: one per
    /// player, one per match, one for settings.
    ///
    /// The match batch is the only write that reaches the external
    /// store and goes first, in a single repository batch; a rejected
    /// batch therefore imports nothing. The in-process collections
    /// follow, and change events fire only once every write has landed.
    #[instrument(skip(self, document))]
    pub async fn import(&self, document: BackupDocument) -> Result<ImportResponse, AppError> {
        let mut imported = 0;

        if let Some(matches) = &document.matches {
            self.match_repository.upsert_matches(matches).await?;
            imported += matches.len();
        }
        if let Some(players) = &document.player_master {
            self.player_repository.upsert_players(players).await?;
            imported += players.len();
        }
        if let Some(settings) = &document.settings {
            self.settings_repository.set_settings(settings).await?;
            imported += 1;
        }

        if document.player_master.is_some() {
            let roster = self.player_repository.list_players().await?;
            self.event_bus
                .emit(StoreEvent::RosterReplaced { players: roster })
                .await;
        }
        if document.matches.is_some() {
            let mut all = self.match_repository.list_matches().await?;
            all.sort_by(|a, b| b.id.cmp(&a.id));
            self.event_bus
                .emit(StoreEvent::MatchesReplaced { matches: all })
                .await;
        }
        if let Some(settings) = document.settings {
            self.event_bus
                .emit(StoreEvent::SettingsReplaced { settings })
                .await;
        }

        info!(imported, "Backup imported");
        Ok(ImportResponse { imported })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::models::MatchRecord;
    use crate::matches::repository::InMemoryMatchRepository;
    use crate::roster::models::Player;
    use crate::roster::repository::InMemoryPlayerRepository;
    use crate::settings::models::Settings;
    use crate::settings::repository::InMemorySettingsRepository;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;
        use async_trait::async_trait;

        /// Match store whose batch write always fails, like a rejected
        /// remote commit
        pub struct RejectingMatchRepository;

        #[async_trait]
        impl MatchRepository for RejectingMatchRepository {
            async fn upsert_match(&self, _record: &MatchRecord) -> Result<(), AppError> {
                Err(AppError::Store("write rejected".to_string()))
            }

            async fn get_match(&self, _match_id: &str) -> Result<Option<MatchRecord>, AppError> {
                Ok(None)
            }

            async fn list_matches(&self) -> Result<Vec<MatchRecord>, AppError> {
                Ok(vec![])
            }

            async fn delete_match(&self, _match_id: &str) -> Result<(), AppError> {
                Err(AppError::Store("write rejected".to_string()))
            }

            async fn upsert_matches(&self, _records: &[MatchRecord]) -> Result<(), AppError> {
                Err(AppError::Store("write rejected".to_string()))
            }
        }

        pub struct Fixture {
            pub service: BackupService,
            pub player_repository: Arc<InMemoryPlayerRepository>,
            pub match_repository: Arc<InMemoryMatchRepository>,
            pub settings_repository: Arc<InMemorySettingsRepository>,
        }

        pub fn fixture() -> Fixture {
            let player_repository = Arc::new(InMemoryPlayerRepository::new());
            let match_repository = Arc::new(InMemoryMatchRepository::new());
            let settings_repository = Arc::new(InMemorySettingsRepository::new());
            let service = BackupService::new(
                player_repository.clone(),
                match_repository.clone(),
                settings_repository.clone(),
                EventBus::new(),
            );
            Fixture {
                service,
                player_repository,
                match_repository,
                settings_repository,
            }
        }

        pub fn player(id: &str, name: &str) -> Player {
            Player {
                id: id.to_string(),
                name: name.to_string(),
                number: "10".to_string(),
            }
        }

        pub fn finished_match(id: &str) -> MatchRecord {
            MatchRecord {
                id: id.to_string(),
                date: "2024-06-01".to_string(),
                opponent: "FC X".to_string(),
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
    async fn test_import_writes_every_section_and_counts() {
        let fixture = fixture();

        let response = fixture
            .service
            .import(BackupDocument {
                player_master: Some(vec![player("p_1", "Alice"), player("p_2", "Bob")]),
                matches: Some(vec![finished_match("m_1")]),
                settings: Some(Settings {
                    my_team_name: "FC US".to_string(),
                    default_duration: 15,
                }),
            })
            .await
            .unwrap();

        assert_eq!(response.imported, 4);
        assert_eq!(
            fixture.player_repository.list_players().await.unwrap().len(),
            2
        );
        assert_eq!(
            fixture.match_repository.list_matches().await.unwrap().len(),
            1
        );
        assert_eq!(
            fixture
                .settings_repository
                .get_settings()
                .await
                .unwrap()
                .unwrap()
                .my_team_name,
            "FC US"
        );
    }

    #[tokio::test]
    async fn test_import_skips_missing_sections() {
        let fixture = fixture();

        let response = fixture
            .service
            .import(BackupDocument {
                player_master: None,
                matches: None,
                settings: None,
            })
            .await
            .unwrap();

        assert_eq!(response.imported, 0);
        assert!(fixture.player_repository.list_players().await.unwrap().is_empty());
        assert!(fixture.settings_repository.get_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_import_overwrites_matching_ids_only() {
        let fixture = fixture();
        fixture
            .service
            .import(BackupDocument {
                player_master: Some(vec![player("p_1", "Alice"), player("p_2", "Bob")]),
                matches: None,
                settings: None,
            })
            .await
            .unwrap();

        fixture
            .service
            .import(BackupDocument {
                player_master: Some(vec![player("p_1", "Alicia")]),
                matches: None,
                settings: None,
            })
            .await
            .unwrap();

        let players = fixture.player_repository.list_players().await.unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Alicia");
        assert_eq!(players[1].name, "Bob");
    }

    #[tokio::test]
    async fn test_failed_match_batch_imports_nothing() {
        let player_repository = Arc::new(InMemoryPlayerRepository::new());
        let settings_repository = Arc::new(InMemorySettingsRepository::new());
        let service = BackupService::new(
            player_repository.clone(),
            Arc::new(RejectingMatchRepository),
            settings_repository.clone(),
            EventBus::new(),
        );

        let result = service
            .import(BackupDocument {
                player_master: Some(vec![player("p_1", "Alice")]),
                matches: Some(vec![finished_match("m_1")]),
                settings: Some(Settings::default()),
            })
            .await;

        assert!(matches!(result, Err(AppError::Store(_))));
        assert!(player_repository.list_players().await.unwrap().is_empty());
        assert!(settings_repository.get_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_export_round_trips_through_import() {
        let fixture = fixture();
        fixture
            .service
            .import(BackupDocument {
                player_master: Some(vec![player("p_1", "Alice")]),
                matches: Some(vec![finished_match("m_1")]),
                settings: Some(Settings::default()),
            })
            .await
            .unwrap();

        let exported = fixture.service.export().await.unwrap();

        let restored = helpers::fixture();
        let response = restored.service.import(exported).await.unwrap();
        assert_eq!(response.imported, 3);
        assert_eq!(
            restored.player_repository.list_players().await.unwrap()[0].name,
            "Alice"
        );
    }

    #[tokio::test]
    async fn test_export_defaults_settings_when_unset() {
        let fixture = fixture();

        let exported = fixture.service.export().await.unwrap();
        let settings = exported.settings.unwrap();
        assert_eq!(settings.my_team_name, "MY TEAM");
        assert_eq!(settings.default_duration, 20);
    }
}
