use serde::{Deserialize, Serialize};

use crate::shared::unique_id_millis;

/// Sentinel scorer id for own goals and unattributed goals
pub const OWN_GOAL_ID: &str = "OG";
/// Display name for the own-goal sentinel
pub const OWN_GOAL_NAME: &str = "OG/不明";
/// Display name for ids no longer on the roster
pub const UNKNOWN_NAME: &str = "Unknown";

/// A roster entry
///
/// The uniform number is free-form text so entries like "10" and "GK"
/// both work. Deleting a player leaves historical events pointing at
/// the old id, which then renders as "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String, // "p_" + creation time in unix millis
    pub name: String,
    pub number: String,
}

impl Player {
    /// Creates a new player with a time-derived id
    pub fn new(name: String, number: String) -> Self {
        Self {
            id: format!("p_{}", unique_id_millis()),
            name,
            number,
        }
    }
}

/// Resolves a player id to a display name against the given roster
pub fn display_name(players: &[Player], player_id: &str) -> String {
    if player_id == OWN_GOAL_ID {
        return OWN_GOAL_NAME.to_string();
    }
    players
        .iter()
        .find(|p| p.id == player_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_has_time_derived_id() {
        let player = Player::new("Alice".to_string(), "9".to_string());
        assert!(player.id.starts_with("p_"));
        assert!(player.id["p_".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn test_rapid_creation_yields_unique_ids() {
        let ids: Vec<String> = (0..50)
            .map(|_| Player::new("P".to_string(), "1".to_string()).id)
            .collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_display_name_resolution() {
        let players = vec![Player {
            id: "p_1".to_string(),
            name: "Alice".to_string(),
            number: "9".to_string(),
        }];

        assert_eq!(display_name(&players, "p_1"), "Alice");
        assert_eq!(display_name(&players, OWN_GOAL_ID), OWN_GOAL_NAME);
        assert_eq!(display_name(&players, "p_gone"), UNKNOWN_NAME);
    }

    #[test]
    fn test_player_wire_shape() {
        let player = Player {
            id: "p_1".to_string(),
            name: "Alice".to_string(),
            number: "9".to_string(),
        };

        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["id"], "p_1");
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["number"], "9");
    }
}
