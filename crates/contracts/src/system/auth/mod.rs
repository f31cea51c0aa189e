use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// `POST /api/auth/authenticate` response. `status` mirrors the envelope's `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<TokenPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Claims read from the access token payload. Used for UI gating only,
/// the signature is never verified client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub exp: i64, // expiration timestamp, seconds
    #[serde(rename = "roleId", default)]
    pub role_id: Option<i64>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<i64>,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.exp <= now_secs
    }
}

/// Role identifiers issued by the backend.
pub const ROLE_ADMIN: i64 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_decode_camel_case() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"exp": 1700000000, "roleId": 1, "userId": 42}"#).unwrap();
        assert_eq!(claims.role_id, Some(ROLE_ADMIN));
        assert_eq!(claims.user_id, Some(42));
        assert!(claims.is_expired_at(1700000000));
        assert!(!claims.is_expired_at(1699999999));
    }

    #[test]
    fn test_authenticate_response_without_data() {
        let resp: AuthenticateResponse =
            serde_json::from_str(r#"{"status": false, "message": "Invalid credentials", "data": null}"#)
                .unwrap();
        assert!(!resp.status);
        assert!(resp.data.is_none());
    }
}
