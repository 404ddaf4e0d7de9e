use serde::{Deserialize, Serialize};

use crate::matches::models::MatchRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStartRequest {
    pub opponent: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMatchResponse {
    #[serde(rename = "match")]
    pub record: MatchRecord,
    pub elapsed_label: String,
}
