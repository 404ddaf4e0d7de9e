use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::Player;
use crate::shared::AppError;

/// Trait for roster repository operations
///
/// The roster preserves insertion order; stats tie-breaking and the
/// player pick lists depend on it.
#[async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, player: &Player) -> Result<(), AppError>;
    async fn get_player(&self, player_id: &str) -> Result<Option<Player>, AppError>;
    async fn list_players(&self) -> Result<Vec<Player>, AppError>;
    async fn update_player(&self, player: &Player) -> Result<(), AppError>;
    async fn delete_player(&self, player_id: &str) -> Result<(), AppError>;

    /// Inserts or replaces players by id, keeping the position of existing entries
    async fn upsert_players(&self, players: &[Player]) -> Result<(), AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<Vec<Player>>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Mutex::new(Vec::new()),
        }
    }

    /// Creates an in-memory repository with a pre-populated roster
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players: Mutex::new(players),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &Player) -> Result<(), AppError> {
        debug!(player_id = %player.id, name = %player.name, "Creating player in memory");

        let mut players = self.players.lock().unwrap();
        if players.iter().any(|p| p.id == player.id) {
            warn!(player_id = %player.id, "Player already exists in memory");
            return Err(AppError::Store("Player already exists".to_string()));
        }
        players.push(player.clone());

        debug!(player_id = %player.id, "Player created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: &str) -> Result<Option<Player>, AppError> {
        debug!(player_id = %player_id, "Fetching player from memory");

        let players = self.players.lock().unwrap();
        let player = players.iter().find(|p| p.id == player_id).cloned();

        match &player {
            Some(p) => debug!(player_id = %player_id, name = %p.name, "Player found in memory"),
            None => debug!(player_id = %player_id, "Player not found in memory"),
        }

        Ok(player)
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<Player>, AppError> {
        debug!("Listing roster in memory");

        let players = self.players.lock().unwrap();
        Ok(players.clone())
    }

    #[instrument(skip(self, player))]
    async fn update_player(&self, player: &Player) -> Result<(), AppError> {
        debug!(player_id = %player.id, "Updating player in memory");

        let mut players = self.players.lock().unwrap();
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => {
                *existing = player.clone();
                debug!(player_id = %player.id, "Player updated successfully in memory");
                Ok(())
            }
            None => {
                warn!(player_id = %player.id, "Player not found for update in memory");
                Err(AppError::NotFound("Player not found".to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: &str) -> Result<(), AppError> {
        debug!(player_id = %player_id, "Deleting player from memory");

        let mut players = self.players.lock().unwrap();
        let before = players.len();
        players.retain(|p| p.id != player_id);

        if players.len() == before {
            warn!(player_id = %player_id, "Player not found for deletion in memory");
            return Err(AppError::NotFound("Player not found".to_string()));
        }

        debug!(player_id = %player_id, "Player deleted successfully from memory");
        Ok(())
    }

    #[instrument(skip(self, incoming))]
    async fn upsert_players(&self, incoming: &[Player]) -> Result<(), AppError> {
        debug!(count = incoming.len(), "Upserting players in memory");

        let mut players = self.players.lock().unwrap();
        for player in incoming {
            match players.iter_mut().find(|p| p.id == player.id) {
                Some(existing) => *existing = player.clone(),
                None => players.push(player.clone()),
            }
        }

        Ok(())
    }
}
