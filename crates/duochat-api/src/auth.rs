use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, Method},
};
use tracing::{error, warn};

use duochat_db::Database;
use duochat_db::models::UserRow;
use duochat_types::api::StatusMessage;

use crate::error::ApiError;
use crate::token::{TokenPolicy, bearer_token, check_expiry};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenPolicy,
}

pub(crate) fn require_post(method: &Method) -> Result<(), ApiError> {
    if *method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }
    Ok(())
}

/// Resolve the bearer credential in `headers` to a stored user.
///
/// Checks run in a fixed order: header shape, payload decode, expiry, then a
/// single store lookup on email + password hash.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<UserRow, ApiError> {
    let token = bearer_token(headers)?;
    let claims = state.tokens.decode(token)?;
    check_expiry(&claims, chrono::Utc::now().timestamp())?;

    // Run blocking DB lookup off the async runtime
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || {
        db.db
            .find_user_by_credentials(&claims.email, &claims.hashed_password)
    })
    .await
    .map_err(|e| {
        error!("Internal Server Error: spawn_blocking join error: {}", e);
        ApiError::Internal
    })?
    .map_err(|e| {
        error!("Database Error: {:#}", e);
        ApiError::Database
    })?;

    user.ok_or_else(|| {
        warn!("No user record matches the presented token");
        ApiError::Unauthorized
    })
}

/// POST /api/auth/verify
pub async fn verify(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
) -> Result<Json<StatusMessage>, ApiError> {
    require_post(&method)?;
    authenticate(&state, &headers).await?;

    Ok(Json(StatusMessage::new("User Verified")))
}
