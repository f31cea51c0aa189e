use contracts::system::auth::{
    AuthenticateRequest, AuthenticateResponse, RefreshRequest, TokenPair,
};

use crate::shared::http::{ApiClient, ApiError};

const AUTHENTICATE_PATH: &str = "/api/auth/authenticate";
const REFRESH_PATH: &str = "/api/auth/refresh";
const INVALID_CREDENTIALS: &str = "Invalid login or password.";

/// Login with login name and password. Stores the token pair on success.
pub async fn authenticate(
    client: &ApiClient,
    login: String,
    password: String,
) -> Result<TokenPair, ApiError> {
    let request = AuthenticateRequest { login, password };
    let response: AuthenticateResponse = client
        .post_public(AUTHENTICATE_PATH, &request)
        .await
        .map_err(login_error)?;
    let tokens = token_pair(response)?;
    client.session().save_tokens(&tokens);
    log::info!("Logged in");
    Ok(tokens)
}

/// Exchange the stored refresh token for a new pair.
pub async fn refresh(client: &ApiClient) -> Result<TokenPair, ApiError> {
    let refresh_token = client
        .session()
        .refresh_token()
        .ok_or(ApiError::Unauthorized)?;
    let request = RefreshRequest { refresh_token };
    let response: AuthenticateResponse = client.post_public(REFRESH_PATH, &request).await?;
    let tokens = token_pair(response)?;
    client.session().save_tokens(&tokens);
    log::info!("Access token refreshed");
    Ok(tokens)
}

/// Logout is local: the backend keeps no session to revoke.
pub fn logout(client: &ApiClient) {
    client.session().clear();
    log::info!("Logged out");
}

fn token_pair(response: AuthenticateResponse) -> Result<TokenPair, ApiError> {
    match response {
        AuthenticateResponse {
            status: true,
            data: Some(tokens),
            ..
        } => Ok(tokens),
        AuthenticateResponse { message, .. } if !message.trim().is_empty() => {
            Err(ApiError::Rejected(message))
        }
        _ => Err(ApiError::Rejected(INVALID_CREDENTIALS.to_string())),
    }
}

/// No session exists yet, so a 401 here means wrong credentials.
fn login_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Unauthorized => ApiError::Rejected(INVALID_CREDENTIALS.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AuthenticateResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_successful_response_yields_tokens() {
        let response = parse(
            r#"{"status": true, "data": {"access_token": "a", "refresh_token": "r"}}"#,
        );
        let tokens = token_pair(response).unwrap();
        assert_eq!(tokens.access_token, "a");
        assert_eq!(tokens.refresh_token, "r");
    }

    #[test]
    fn test_rejected_response_keeps_server_message() {
        let response = parse(r#"{"status": false, "message": "User is blocked", "data": null}"#);
        assert_eq!(
            token_pair(response),
            Err(ApiError::Rejected("User is blocked".into()))
        );
    }

    #[test]
    fn test_missing_tokens_rejected() {
        let response = parse(r#"{"status": true, "data": null}"#);
        assert!(matches!(token_pair(response), Err(ApiError::Rejected(_))));
    }

    #[test]
    fn test_login_401_reads_as_wrong_credentials() {
        let err = login_error(ApiError::from_status(401, ""));
        assert_eq!(err.user_message(), "Invalid login or password.");
        assert!(!err.user_message().contains("session"));
        assert_eq!(login_error(ApiError::Forbidden), ApiError::Forbidden);
        assert!(matches!(
            login_error(ApiError::from_status(0, "")),
            ApiError::Network(_)
        ));
    }
}
