use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error type for all API calls.
///
/// `Status` keeps the numeric HTTP status next to the normalized message so
/// callers (and the retry loop) can branch on the code itself rather than
/// matching on message text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response format from server")]
    InvalidResponse,

    /// The request descriptor itself was unusable (bad header value,
    /// unserializable body). No network attempt was made.
    #[error("{0}")]
    Request(String),

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

/// Error payloads from the backend carry the human-readable text in either
/// a `message` or a `detail` field depending on the view that produced them.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<String>,
}

impl ApiError {
    /// Normalize a non-success response into a `Status` error, mapping
    /// well-known status codes to canned messages and falling back to
    /// whatever the body says.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = match status.as_u16() {
            401 => "Authentication failed. Please log in again.".to_string(),
            403 => "You don't have permission to perform this action.".to_string(),
            404 => "The requested resource was not found.".to_string(),
            422 => "Invalid data provided. Please check your input.".to_string(),
            500 => "Server error. Please try again later.".to_string(),
            502 | 503 | 504 => {
                "Server is temporarily unavailable. Please try again later.".to_string()
            }
            _ => Self::message_from_body(body),
        };

        ApiError::Status { status, message }
    }

    fn message_from_body(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(message) = parsed.message.or(parsed.detail) {
                return message;
            }
        }
        if body.trim().is_empty() {
            "An error occurred".to_string()
        } else {
            body.to_string()
        }
    }

    /// The HTTP status that produced this error, when there was one.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the retry loop should attempt this call again. Bad
    /// credentials and bad requests will not improve on retry; neither
    /// will a request that never left the process.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => {
                *status != StatusCode::UNAUTHORIZED && *status != StatusCode::BAD_REQUEST
            }
            ApiError::Request(_) => false,
            _ => true,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Request(format!("Failed to serialize request body: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_for(status: u16, body: &str) -> String {
        match ApiError::from_status(StatusCode::from_u16(status).unwrap(), body) {
            ApiError::Status { message, .. } => message,
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[test]
    fn canned_messages_for_known_statuses() {
        assert_eq!(
            message_for(401, ""),
            "Authentication failed. Please log in again."
        );
        assert_eq!(
            message_for(403, ""),
            "You don't have permission to perform this action."
        );
        assert_eq!(
            message_for(404, ""),
            "The requested resource was not found."
        );
        assert_eq!(
            message_for(422, ""),
            "Invalid data provided. Please check your input."
        );
        assert_eq!(message_for(500, ""), "Server error. Please try again later.");
        for status in [502, 503, 504] {
            assert_eq!(
                message_for(status, ""),
                "Server is temporarily unavailable. Please try again later."
            );
        }
    }

    #[test]
    fn canned_messages_override_body_text() {
        assert_eq!(
            message_for(401, r#"{"message":"token expired"}"#),
            "Authentication failed. Please log in again."
        );
    }

    #[test]
    fn other_statuses_use_message_field() {
        assert_eq!(
            message_for(418, r#"{"message":"teapot refuses"}"#),
            "teapot refuses"
        );
    }

    #[test]
    fn other_statuses_use_detail_field() {
        assert_eq!(
            message_for(409, r#"{"detail":"already exists"}"#),
            "already exists"
        );
    }

    #[test]
    fn non_json_body_used_verbatim() {
        assert_eq!(message_for(409, "plain failure text"), "plain failure text");
    }

    #[test]
    fn empty_body_falls_back_to_generic_message() {
        assert_eq!(message_for(409, ""), "An error occurred");
        assert_eq!(message_for(409, "   "), "An error occurred");
    }

    #[test]
    fn retry_classification_uses_status_code() {
        assert!(!ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_retryable());
        assert!(!ApiError::from_status(StatusCode::BAD_REQUEST, "").is_retryable());
        assert!(ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "").is_retryable());
        assert!(ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "").is_retryable());
        assert!(ApiError::from_status(StatusCode::BAD_GATEWAY, "").is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::InvalidResponse.is_retryable());
        assert!(!ApiError::Request("bad header".into()).is_retryable());
    }

    #[test]
    fn status_code_accessor() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
        assert_eq!(ApiError::Timeout.status_code(), None);
    }
}
