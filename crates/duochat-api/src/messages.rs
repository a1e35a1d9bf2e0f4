use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::Method,
};
use serde_json::Value;
use tracing::error;

use duochat_types::api::{GetMessagesRequest, MessagesFetched};

use crate::auth::{AppState, require_post};
use crate::error::ApiError;
use crate::rows::message_from_row;

/// POST /api/chat/getMessages
///
/// Straight passthrough: every message of the room, in storage order, with
/// no pagination. An empty room is a success.
pub async fn get_messages(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<MessagesFetched>, ApiError> {
    require_post(&method)?;

    // Unparseable bodies are treated as an empty one.
    let req: GetMessagesRequest = serde_json::from_slice(&body).unwrap_or_default();
    let chatroom_id = require_chatroom_id(req.chatroom_id)?;

    // Run blocking DB query off the async runtime
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_messages(&chatroom_id))
        .await
        .map_err(|e| {
            error!("Internal Server Error: spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(|e| {
            error!("Error fetching messages: {:#}", e);
            ApiError::MessageQuery(e.to_string())
        })?;

    Ok(Json(MessagesFetched {
        message: "Messages fetched successfully".into(),
        data: rows.into_iter().map(message_from_row).collect(),
    }))
}

/// JSON falsy values count as a missing field; anything else is passed to
/// the store untouched.
fn require_chatroom_id(value: Value) -> Result<Value, ApiError> {
    let missing = match &value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) | Value::Bool(true) => false,
    };
    if missing {
        return Err(ApiError::MissingFields);
    }
    Ok(value)
}
