use matchday::matches::repository::InMemoryMatchRepository;
// use matchday::matches::repository::PostgresMatchRepository; // For production
use matchday::roster::repository::InMemoryPlayerRepository;
use matchday::session::repository::InMemorySessionRepository;
use matchday::session::service::SessionService;
use matchday::settings::repository::InMemorySettingsRepository;
use matchday::tracker::cache::FileBlobCache;
use matchday::tracker::TrackerService;
use matchday::{AppState, EventBus};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matchday=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matchday team server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let player_repository = Arc::new(InMemoryPlayerRepository::new());
    let match_repository = Arc::new(InMemoryMatchRepository::new());
    let settings_repository = Arc::new(InMemorySettingsRepository::new());
    let session_repository = Arc::new(InMemorySessionRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let match_repository = Arc::new(PostgresMatchRepository::new(pool));

    let cache_path = std::env::var("MATCHDAY_CACHE_PATH").unwrap_or_else(|_| "./data".into());
    let cache = Arc::new(FileBlobCache::new(cache_path));

    let event_bus = EventBus::new();
    let session_service = Arc::new(SessionService::new(session_repository.clone()));
    let tracker = Arc::new(TrackerService::new(
        cache,
        match_repository.clone(),
        settings_repository.clone(),
        player_repository.clone(),
        event_bus.clone(),
    ));

    // A live match interrupted by a restart comes back from the cache
    if let Err(e) = tracker.recover().await {
        warn!(error = %e, "Could not recover cached live match");
    }

    let app_state = AppState::new(
        player_repository,
        match_repository,
        settings_repository,
        session_repository,
        session_service,
        tracker,
        event_bus,
    );

    let app = matchday::router(app_state);

    // run our app with hyper, listening globally on port 3000
    let addr = std::env::var("MATCHDAY_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    info!("Server running on http://{addr}");
    axum::serve(listener, app).await.unwrap();
}
