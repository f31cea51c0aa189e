use contracts::shared::api::{ApiResponse, ValidationErrorBody};
use contracts::shared::validation::ValidationErrors;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Every failure a screen can show. The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Unable to connect to the server. Please check your internet connection.")]
    Network(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    #[error("You do not have permission to perform this action.")]
    Forbidden,

    #[error("The requested resource was not found.")]
    NotFound,

    #[error("{message}")]
    Validation {
        message: String,
        errors: ValidationErrors,
    },

    #[error("The server is temporarily unavailable. Please try again later.")]
    ServerUnavailable(u16),

    #[error("Something went wrong on the server (error {0}). Please try again.")]
    Server(u16),

    /// Envelope came back with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response from the server.")]
    Decode(String),

    /// Operation not offered for this entity; raised before any request
    #[error("{0}")]
    Unsupported(String),

    /// Local pre-submit validation failed
    #[error("Please correct the highlighted fields.")]
    Invalid(ValidationErrors),
}

const BAD_REQUEST_FALLBACK: &str = "The request was invalid.";
const VALIDATION_FALLBACK: &str = "Some fields are invalid.";

impl ApiError {
    /// Translate an HTTP status (0 = no response) and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            0 => ApiError::Network("no response".to_string()),
            400 => {
                let parsed = parse_error_body(body);
                let message = parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| BAD_REQUEST_FALLBACK.to_string());
                if parsed.errors.is_empty() {
                    ApiError::BadRequest(message)
                } else {
                    ApiError::Validation {
                        message,
                        errors: parsed.errors.into(),
                    }
                }
            }
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            422 => {
                let parsed = parse_error_body(body);
                ApiError::Validation {
                    message: parsed
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| VALIDATION_FALLBACK.to_string()),
                    errors: parsed.errors.into(),
                }
            }
            500 | 503 => ApiError::ServerUnavailable(status),
            other => ApiError::Server(other),
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Worth one more try for idempotent requests.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_) | ApiError::ServerUnavailable(_) | ApiError::Server(502 | 504)
        )
    }

    /// Field messages to show next to form inputs.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Validation { errors, .. } | ApiError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

fn parse_error_body(body: &str) -> ValidationErrorBody {
    serde_json::from_str(body).unwrap_or_default()
}

/// Unwrap `{success, message, data}`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: ApiResponse<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.success {
        serde_json::from_value(envelope.data).map_err(|e| ApiError::Decode(e.to_string()))
    } else if envelope.message.trim().is_empty() {
        Err(ApiError::Rejected("The request could not be completed.".to_string()))
    } else {
        Err(ApiError::Rejected(envelope.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(ApiError::from_status(0, ""), ApiError::Network(_)));
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, ""), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
        assert_eq!(ApiError::from_status(500, ""), ApiError::ServerUnavailable(500));
        assert_eq!(ApiError::from_status(503, ""), ApiError::ServerUnavailable(503));
        assert_eq!(ApiError::from_status(418, ""), ApiError::Server(418));
    }

    #[test]
    fn test_bad_request_uses_server_message_with_fallback() {
        let err = ApiError::from_status(400, r#"{"message": "Phone already registered"}"#);
        assert_eq!(err.user_message(), "Phone already registered");
        let err = ApiError::from_status(400, "<html>oops</html>");
        assert_eq!(err.user_message(), BAD_REQUEST_FALLBACK);
    }

    #[test]
    fn test_validation_carries_fields() {
        let err = ApiError::from_status(
            422,
            r#"{"message": "Invalid data", "errors": {"name": ["The name field is required."]}}"#,
        );
        assert_eq!(err.user_message(), "Invalid data");
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.field("name").len(), 1);

        let err = ApiError::from_status(422, "");
        assert_eq!(err.user_message(), VALIDATION_FALLBACK);
    }

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::from_status(0, "").is_transient());
        assert!(ApiError::from_status(503, "").is_transient());
        assert!(ApiError::from_status(502, "").is_transient());
        assert!(!ApiError::from_status(404, "").is_transient());
        assert!(!ApiError::from_status(422, "").is_transient());
        assert!(!ApiError::Unauthorized.is_transient());
    }

    #[test]
    fn test_decode_envelope() {
        let ok: i32 = decode_envelope(r#"{"success": true, "message": "", "data": 5}"#).unwrap();
        assert_eq!(ok, 5);

        let err = decode_envelope::<i32>(r#"{"success": false, "message": "Unit in use", "data": null}"#)
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("Unit in use".into()));

        assert!(decode_envelope::<()>(r#"{"success": true, "message": "Deleted"}"#).is_ok());

        let err = decode_envelope::<i32>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
