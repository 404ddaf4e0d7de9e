use serde::Deserialize;

/// Request payload for adding a roster player
#[derive(Debug, Deserialize)]
pub struct PlayerCreateRequest {
    pub name: String,
    pub number: String,
}

/// Request payload for editing a roster player, fields left out stay unchanged
#[derive(Debug, Deserialize)]
pub struct PlayerUpdateRequest {
    pub name: Option<String>,
    pub number: Option<String>,
}
