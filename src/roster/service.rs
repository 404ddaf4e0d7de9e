use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::Player,
    repository::PlayerRepository,
    types::{PlayerCreateRequest, PlayerUpdateRequest},
};
use crate::event::{EventBus, StoreEvent};
use crate::shared::AppError;

/// Service for roster business logic
pub struct RosterService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
    event_bus: EventBus,
}

impl RosterService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>, event_bus: EventBus) -> Self {
        Self {
            repository,
            event_bus,
        }
    }

    /// Adds a player to the end of the roster
    #[instrument(skip(self))]
    pub async fn add_player(&self, request: PlayerCreateRequest) -> Result<Player, AppError> {
        let name = request.name.trim();
        let number = request.number.trim();
        if name.is_empty() || number.is_empty() {
            return Err(AppError::Validation(
                "Player name and number are required".to_string(),
            ));
        }

        let player = Player::new(name.to_string(), number.to_string());
        debug!(player_id = %player.id, "Generated player id");

        self.repository.create_player(&player).await?;
        self.emit_roster().await?;

        info!(player_id = %player.id, name = %player.name, "Player added to roster");
        Ok(player)
    }

    /// Edits a player's name and/or number
    #[instrument(skip(self))]
    pub async fn update_player(
        &self,
        player_id: &str,
        request: PlayerUpdateRequest,
    ) -> Result<Player, AppError> {
        let mut player = self
            .repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::Validation("Player name cannot be empty".to_string()));
            }
            player.name = name;
        }
        if let Some(number) = request.number {
            let number = number.trim().to_string();
            if number.is_empty() {
                return Err(AppError::Validation(
                    "Player number cannot be empty".to_string(),
                ));
            }
            player.number = number;
        }

        self.repository.update_player(&player).await?;
        self.emit_roster().await?;

        info!(player_id = %player.id, "Player updated");
        Ok(player)
    }

    /// Removes a player from the roster, historical events keep the id
    #[instrument(skip(self))]
    pub async fn remove_player(&self, player_id: &str) -> Result<(), AppError> {
        self.repository.delete_player(player_id).await?;
        self.emit_roster().await?;

        info!(player_id = %player_id, "Player removed from roster");
        Ok(())
    }

    /// Lists the roster in insertion order
    #[instrument(skip(self))]
    pub async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        self.repository.list_players().await
    }

    async fn emit_roster(&self) -> Result<(), AppError> {
        let players = self.repository.list_players().await?;
        self.event_bus
            .emit(StoreEvent::RosterReplaced { players })
            .await;
        Ok(())
    }
}
