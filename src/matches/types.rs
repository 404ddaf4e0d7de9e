use serde::Deserialize;

/// Query parameters for listing historical matches
#[derive(Debug, Default, Deserialize)]
pub struct MatchListQuery {
    /// Single calendar day, matched after date parsing
    pub date: Option<String>,
    /// Inclusive range start
    pub start: Option<String>,
    /// Inclusive range end
    pub end: Option<String>,
    /// Exact opponent name
    pub opponent: Option<String>,
    /// Cap on returned records, newest first
    pub limit: Option<usize>,
}

/// Request payload for editing match metadata
#[derive(Debug, Deserialize)]
pub struct MatchMetaUpdateRequest {
    pub opponent: Option<String>,
    pub label: Option<String>,
}

/// Request payload for recording a goal, live or post-hoc
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRequest {
    pub scorer_id: String,
    pub assist_id: Option<String>,
}
