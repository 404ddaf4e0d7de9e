use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::Settings;
use crate::shared::AppError;

/// Trait for the settings singleton document
#[async_trait]
pub trait SettingsRepository {
    async fn get_settings(&self) -> Result<Option<Settings>, AppError>;
    async fn set_settings(&self, settings: &Settings) -> Result<(), AppError>;
}

/// In-memory implementation of SettingsRepository for development and testing
pub struct InMemorySettingsRepository {
    settings: Mutex<Option<Settings>>,
}

impl Default for InMemorySettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySettingsRepository {
    /// Creates a repository with no stored document yet
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    #[instrument(skip(self))]
    async fn get_settings(&self) -> Result<Option<Settings>, AppError> {
        debug!("Fetching settings from memory");
        Ok(self.settings.lock().unwrap().clone())
    }

    #[instrument(skip(self, settings))]
    async fn set_settings(&self, settings: &Settings) -> Result<(), AppError> {
        debug!(team = %settings.my_team_name, "Storing settings in memory");
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_repository_returns_none() {
        let repo = InMemorySettingsRepository::new();
        assert!(repo.get_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let repo = InMemorySettingsRepository::new();
        let settings = Settings {
            my_team_name: "FC Test".to_string(),
            default_duration: 15,
        };

        repo.set_settings(&settings).await.unwrap();
        assert_eq!(repo.get_settings().await.unwrap(), Some(settings));
    }
}
