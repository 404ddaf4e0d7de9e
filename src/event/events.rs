use serde::{Deserialize, Serialize};

use crate::matches::models::MatchRecord;
use crate::roster::models::Player;
use crate::settings::models::Settings;

/// Names of the store collections observers can subscribe to
pub mod collections {
    pub const PLAYERS: &str = "players";
    pub const MATCHES: &str = "matches";
    pub const SETTINGS: &str = "settings";
    pub const CURRENT_MATCH: &str = "current_match";
}

/// Change notifications emitted after store mutations
///
/// Each event carries the whole affected collection. Observers replace
/// their copy wholesale instead of applying field-level merges, so a
/// missed event is repaired by the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The player roster has changed
    RosterReplaced { players: Vec<Player> },

    /// The historical match collection has changed
    MatchesReplaced { matches: Vec<MatchRecord> },

    /// The settings document has changed
    SettingsReplaced { settings: Settings },

    /// The live match slot has changed (None when cleared)
    CurrentMatchReplaced { record: Option<MatchRecord> },
}

impl StoreEvent {
    /// Get the collection this event belongs to
    pub fn collection(&self) -> &'static str {
        match self {
            StoreEvent::RosterReplaced { .. } => collections::PLAYERS,
            StoreEvent::MatchesReplaced { .. } => collections::MATCHES,
            StoreEvent::SettingsReplaced { .. } => collections::SETTINGS,
            StoreEvent::CurrentMatchReplaced { .. } => collections::CURRENT_MATCH,
        }
    }

    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            StoreEvent::RosterReplaced { .. } => "roster_replaced",
            StoreEvent::MatchesReplaced { .. } => "matches_replaced",
            StoreEvent::SettingsReplaced { .. } => "settings_replaced",
            StoreEvent::CurrentMatchReplaced { .. } => "current_match_replaced",
        }
    }
}
