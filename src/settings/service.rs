use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::Settings, repository::SettingsRepository};
use crate::event::{EventBus, StoreEvent};
use crate::shared::AppError;

/// Service for settings business logic
pub struct SettingsService {
    repository: Arc<dyn SettingsRepository + Send + Sync>,
    event_bus: EventBus,
}

impl SettingsService {
    pub fn new(
        repository: Arc<dyn SettingsRepository + Send + Sync>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            repository,
            event_bus,
        }
    }

    /// Returns the stored settings, or the defaults when nothing is stored yet
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> Result<Settings, AppError> {
        Ok(self.repository.get_settings().await?.unwrap_or_default())
    }

    /// Replaces the settings document
    #[instrument(skip(self))]
    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, AppError> {
        if settings.my_team_name.trim().is_empty() {
            return Err(AppError::Validation("Team name is required".to_string()));
        }
        if settings.default_duration < 1 {
            return Err(AppError::Validation(
                "Default duration must be at least 1 minute".to_string(),
            ));
        }

        self.repository.set_settings(&settings).await?;
        self.event_bus
            .emit(StoreEvent::SettingsReplaced {
                settings: settings.clone(),
            })
            .await;

        info!(team = %settings.my_team_name, "Settings updated");
        Ok(settings)
    }
}
