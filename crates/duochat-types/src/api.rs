use serde::{Deserialize, Serialize};

use crate::models::{Chatroom, Message};

// -- Credential --

/// Claims carried in the payload segment of a bearer token.
///
/// Shared by the server (verification) and by anything that needs to mint a
/// token for a stored user, e.g. tests and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "hashedPassword")]
    pub hashed_password: String,
    pub email: String,
    /// Expiry, seconds since the Unix epoch. Issuers may send a fraction.
    pub exp: f64,
}

// -- Responses --

/// Body of every response that carries no data: `{message, error?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesFetched {
    pub message: String,
    pub data: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatroomsFetched {
    pub message: String,
    pub data: Vec<Chatroom>,
}

// -- Requests --

/// Body of `POST /api/chat/getMessages`.
///
/// `chatroom_id` is kept as raw JSON so that falsy values (`null`, `0`, `""`,
/// `false`) and a missing field are all reported the same way.
#[derive(Debug, Default, Deserialize)]
pub struct GetMessagesRequest {
    #[serde(default)]
    pub chatroom_id: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_use_camel_case_password_field() {
        let claims: Claims = serde_json::from_str(
            r#"{"hashedPassword":"abc123","email":"a@b.com","exp":1700000000}"#,
        )
        .unwrap();
        assert_eq!(claims.hashed_password, "abc123");
        assert_eq!(claims.exp, 1_700_000_000.0);
    }

    #[test]
    fn claims_accept_fractional_expiry() {
        let claims: Claims = serde_json::from_str(
            r#"{"hashedPassword":"abc123","email":"a@b.com","exp":1700000000.75}"#,
        )
        .unwrap();
        assert_eq!(claims.exp, 1_700_000_000.75);
    }

    #[test]
    fn status_message_omits_absent_error() {
        let body = serde_json::to_value(StatusMessage::new("Unauthorized")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Unauthorized" }));

        let body = serde_json::to_value(StatusMessage::new("Invalid token").with_error("Invalid token")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "message": "Invalid token", "error": "Invalid token" })
        );
    }

    #[test]
    fn missing_chatroom_id_is_null() {
        let req: GetMessagesRequest = serde_json::from_str("{}").unwrap();
        assert!(req.chatroom_id.is_null());
    }
}
