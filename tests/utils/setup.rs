use std::sync::Arc;

use axum::Router;

use matchday::{
    event::EventBus,
    matches::repository::{InMemoryMatchRepository, MatchRepository},
    roster::repository::{InMemoryPlayerRepository, PlayerRepository},
    session::{repository::InMemorySessionRepository, service::SessionService},
    settings::repository::{InMemorySettingsRepository, SettingsRepository},
    tracker::{cache::InMemoryBlobCache, TrackerService},
    AppState, MatchRecord, Player, Settings,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub router: Router,
    pub event_bus: EventBus,
    pub match_repository: Arc<InMemoryMatchRepository>,
}

pub struct TestAppBuilder {
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    settings: Option<Settings>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            matches: vec![],
            settings: None,
        }
    }

    pub fn with_player(mut self, id: &str, name: &str, number: &str) -> Self {
        self.players.push(Player {
            id: id.to_string(),
            name: name.to_string(),
            number: number.to_string(),
        });
        self
    }

    pub fn with_three_players(self) -> Self {
        self.with_player("p1", "Alice", "9")
            .with_player("p2", "Bob", "7")
            .with_player("p3", "Carol", "4")
    }

    pub fn with_match(mut self, record: MatchRecord) -> Self {
        self.matches.push(record);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub async fn build(self) -> TestApp {
        let event_bus = EventBus::new();
        let player_repository = Arc::new(InMemoryPlayerRepository::new());
        let match_repository = Arc::new(InMemoryMatchRepository::new());
        let settings_repository = Arc::new(InMemorySettingsRepository::new());
        let session_repository = Arc::new(InMemorySessionRepository::new());

        for player in &self.players {
            player_repository.create_player(player).await.unwrap();
        }
        for record in &self.matches {
            match_repository.upsert_match(record).await.unwrap();
        }
        if let Some(settings) = &self.settings {
            settings_repository.set_settings(settings).await.unwrap();
        }

        let session_service = Arc::new(SessionService::new(session_repository.clone()));
        let tracker = Arc::new(TrackerService::new(
            Arc::new(InMemoryBlobCache::new()),
            match_repository.clone(),
            settings_repository.clone(),
            player_repository.clone(),
            event_bus.clone(),
        ));

        let state = AppState::new(
            player_repository,
            match_repository.clone(),
            settings_repository,
            session_repository,
            session_service,
            tracker,
            event_bus.clone(),
        );

        TestApp {
            router: matchday::router(state),
            event_bus,
            match_repository,
        }
    }
}
