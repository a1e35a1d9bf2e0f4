use reqwest::{Client, Response};
use serde_json::json;
use tracing::debug;

use duochat_types::api::{ChatroomsFetched, MessagesFetched, StatusMessage};
use duochat_types::models::{Chatroom, Message};

use crate::error::ClientError;

/// The credential of the signed-in user, handed to every call explicitly.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Thin wrapper over the duochat HTTP routes.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// POST /api/auth/verify
    pub async fn verify(&self, session: &Session) -> Result<(), ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/auth/verify", self.base_url))
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }

    /// POST /api/chat/findUserChats
    pub async fn find_user_chats(&self, session: &Session) -> Result<Vec<Chatroom>, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/chat/findUserChats", self.base_url))
            .header(reqwest::header::AUTHORIZATION, session.bearer())
            .send()
            .await?;

        let fetched: ChatroomsFetched = check(resp).await?.json().await?;
        debug!("Fetched {} chatrooms", fetched.data.len());
        Ok(fetched.data)
    }

    /// POST /api/chat/getMessages
    pub async fn get_messages(&self, chatroom_id: i64) -> Result<Vec<Message>, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/chat/getMessages", self.base_url))
            .json(&json!({ "chatroom_id": chatroom_id }))
            .send()
            .await?;

        let fetched: MessagesFetched = check(resp).await?.json().await?;
        Ok(fetched.data)
    }
}

/// Pass 2xx responses through; turn anything else into `ClientError::Api`.
async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<StatusMessage>(&body)
        .map(|m| m.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
