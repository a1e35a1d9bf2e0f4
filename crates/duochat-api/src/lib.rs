pub mod auth;
pub mod chatrooms;
pub mod error;
pub mod messages;
pub mod rows;
pub mod token;

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::auth::AppState;

/// All routes of the service. Each route accepts any method so that handlers
/// can answer non-POST requests with the JSON 405 body.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/auth/verify", any(auth::verify))
        .route("/api/chat/getMessages", any(messages::get_messages))
        .route("/api/chat/findUserChats", any(chatrooms::find_user_chats))
        .route("/health", get(health));

    with_panic_guard(routes).with_state(state)
}

/// Turn handler panics into the JSON 500 body instead of a dropped connection.
pub fn with_panic_guard<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes.layer(CatchPanicLayer::custom(error::handle_panic))
}

async fn health() -> &'static str {
    "OK"
}
