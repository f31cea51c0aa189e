//! Access token payload decoding.
//!
//! The token is split and its payload base64url-decoded. The signature is
//! NOT verified: claims only drive UI gating, the backend enforces access.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use contracts::system::auth::TokenClaims;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("token is not a JWT")]
    Malformed,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token payload is not valid JSON: {0}")]
    Json(String),
}

pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(ClaimsError::Malformed),
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClaimsError::Encoding(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Json(e.to_string()))
}

#[cfg(test)]
pub(crate) fn make_token(payload_json: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload_json);
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_payload() {
        let token = make_token(r#"{"exp": 2000000000, "roleId": 2, "userId": 7}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 2000000000);
        assert_eq!(claims.role_id, Some(2));
        assert_eq!(claims.user_id, Some(7));
    }

    #[test]
    fn test_tolerates_padding() {
        let token = make_token(r#"{"exp": 1}"#);
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        assert!(decode_claims(&parts.join(".")).is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(decode_claims("abc"), Err(ClaimsError::Malformed));
        assert_eq!(decode_claims("a..c"), Err(ClaimsError::Malformed));
        assert!(matches!(decode_claims("a.!!!.c"), Err(ClaimsError::Encoding(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("nope"));
        assert!(matches!(decode_claims(&not_json), Err(ClaimsError::Json(_))));
    }
}
