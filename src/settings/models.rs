use serde::{Deserialize, Serialize};

fn default_team_name() -> String {
    "MY TEAM".to_string()
}

fn default_duration() -> u32 {
    20
}

/// Singleton settings document
///
/// Per-field defaults let partial documents from older exports
/// deserialize as if merged over the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_team_name")]
    pub my_team_name: String,
    #[serde(default = "default_duration")]
    pub default_duration: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            my_team_name: default_team_name(),
            default_duration: default_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.my_team_name, "MY TEAM");
        assert_eq!(settings.default_duration, 20);
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"myTeamName": "FC Test"}"#).unwrap();
        assert_eq!(settings.my_team_name, "FC Test");
        assert_eq!(settings.default_duration, 20);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json.get("myTeamName").is_some());
        assert!(json.get("defaultDuration").is_some());
    }
}
