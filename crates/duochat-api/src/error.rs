use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use duochat_types::api::StatusMessage;

/// Every failure a route can report. Each variant renders as a fixed
/// `{message, error?}` body; nothing propagates past the handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Missing or malformed `Authorization` header, or an undecodable token.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// No user record matches the decoded claims. Deliberately silent about
    /// which claim failed to match.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Missing required fields")]
    MissingFields,

    /// Store failure while authenticating. The cause is logged, not returned.
    #[error("Database Error")]
    Database,

    /// Store failure while listing messages. Carries the store's error text,
    /// which is returned to the caller.
    #[error("Error fetching messages")]
    MessageQuery(String),

    #[error("Error fetching chatrooms")]
    ChatroomQuery(String),

    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidToken | ApiError::TokenExpired | ApiError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::Database
            | ApiError::MessageQuery(_)
            | ApiError::ChatroomQuery(_)
            | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> StatusMessage {
        let body = StatusMessage::new(self.to_string());
        match self {
            ApiError::InvalidToken | ApiError::TokenExpired => body.with_error(self.to_string()),
            ApiError::MessageQuery(detail) | ApiError::ChatroomQuery(detail) => {
                body.with_error(detail.clone())
            }
            _ => body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Response for a handler that panicked, installed via `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".into());
    error!("Internal Server Error: handler panicked: {}", detail);

    ApiError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_echo_message_in_error() {
        let body = ApiError::TokenExpired.body();
        assert_eq!(body.message, "Token expired");
        assert_eq!(body.error.as_deref(), Some("Token expired"));

        let body = ApiError::Unauthorized.body();
        assert_eq!(body.message, "Unauthorized");
        assert!(body.error.is_none());
    }

    #[test]
    fn message_query_leaks_store_text() {
        let err = ApiError::MessageQuery("no such table: messages".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = err.body();
        assert_eq!(body.message, "Error fetching messages");
        assert_eq!(body.error.as_deref(), Some("no such table: messages"));
    }

    #[test]
    fn database_error_stays_generic() {
        let body = ApiError::Database.body();
        assert_eq!(body.message, "Database Error");
        assert!(body.error.is_none());
    }

    #[test]
    fn panics_become_internal_errors() {
        let resp = handle_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
