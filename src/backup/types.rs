use serde::{Deserialize, Serialize};

use crate::matches::models::MatchRecord;
use crate::roster::models::Player;
use crate::settings::models::Settings;

/// Full-state document exchanged by the export and import endpoints
///
/// The field names follow the legacy backup files, so archives made with
/// the old client import unchanged. Missing sections are skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(rename = "playerMaster", default, skip_serializing_if = "Option::is_none")]
    pub player_master: Option<Vec<Player>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<MatchRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
}
