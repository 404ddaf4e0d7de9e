use serde::{Deserialize, Serialize};

/// Accumulated goal and assist counts for one roster player
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatLine {
    pub player_id: String,
    pub name: String,
    pub number: String,
    pub goals: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub match_count: usize,
    pub total_goals: u32,
    pub players: Vec<PlayerStatLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}
