use serde::{Deserialize, Serialize};

/// JWT claims structure containing session information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub session_id: String,
    pub username: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

#[derive(Debug, Deserialize)]
pub struct SessionCreateRequest {
    pub username: String,
}

/// Response structure for session creation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub username: String,
    pub token: String, // The JWT to present as a Bearer token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_claims_round_trip() {
        let claims = SessionClaims {
            session_id: "test-id".to_string(),
            username: "coach".to_string(),
            exp: 1234567890,
            iat: 1234567800,
        };

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: SessionClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }

    #[test]
    fn test_session_response_wire_shape() {
        let response = SessionResponse {
            session_id: "session-uuid".to_string(),
            username: "coach".to_string(),
            token: "jwt-token-here".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionId"], "session-uuid");
        assert_eq!(json["username"], "coach");
        assert_eq!(json["token"], "jwt-token-here");
    }
}
