use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Method},
};
use tracing::{debug, error};

use duochat_types::api::ChatroomsFetched;

use crate::auth::{AppState, authenticate, require_post};
use crate::error::ApiError;
use crate::rows::chatroom_from_row;

/// POST /api/chat/findUserChats
///
/// Authenticates the caller the same way as `/api/auth/verify`, then lists
/// every chatroom the caller takes part in.
pub async fn find_user_chats(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Json<ChatroomsFetched>, ApiError> {
    require_post(&method)?;
    let user = authenticate(&state, &headers).await?;
    let user_id = user.id;

    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_chatrooms_for_user(user_id))
        .await
        .map_err(|e| {
            error!("Internal Server Error: spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(|e| {
            error!("Error fetching chatrooms: {:#}", e);
            ApiError::ChatroomQuery(e.to_string())
        })?;

    debug!("User {} has {} chatrooms", user_id, rows.len());

    Ok(Json(ChatroomsFetched {
        message: "Chatrooms fetched successfully".into(),
        data: rows.into_iter().map(chatroom_from_row).collect(),
    }))
}
