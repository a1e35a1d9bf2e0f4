use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use duochat_api::auth::{AppState, AppStateInner};
use duochat_api::token::TokenPolicy;
use duochat_db::Database;
use duochat_types::api::Claims;

pub const ALICE_EMAIL: &str = "a@b.com";
pub const ALICE_HASH: &str = "abc123";

/// Users 1 (alice), 2, 3; chatrooms 10 (1,2), 11 (3,1), 12 (2,3); messages in
/// rooms 10 and 11, interleaved so that storage order matters.
const SEED: &str = "
    INSERT INTO auth_user (id, email, password) VALUES
        (1, 'a@b.com', 'abc123'),
        (2, 'c@d.com', 'def456'),
        (3, 'e@f.com', 'ghi789');
    INSERT INTO chatrooms (chatroom_id, user_id_1, user_id_2, created_at) VALUES
        (10, 1, 2, '2024-03-01 09:00:00'),
        (11, 3, 1, '2024-03-02 09:00:00'),
        (12, 2, 3, '2024-03-03 09:00:00');
    INSERT INTO messages (message_id, chatroom_id, sender_id, content, created_at) VALUES
        (100, 10, 1, 'hi', '2024-03-01 10:00:00'),
        (101, 11, 3, 'other room', '2024-03-01 10:01:00'),
        (102, 10, 2, 'hello back', '2024-03-01 10:02:00'),
        (103, 10, 1, 'how are you', '2024-03-01 09:59:00');
";

pub fn state(tokens: TokenPolicy) -> AppState {
    let db = Database::open_in_memory().expect("in-memory database should open");
    db.with_conn(|conn| {
        conn.execute_batch(SEED)?;
        Ok(())
    })
    .expect("seed data should insert");

    Arc::new(AppStateInner { db, tokens })
}

/// Drop `table` so that every later query against it fails.
pub fn break_table(state: &AppState, table: &str) {
    state
        .db
        .with_conn(|conn| {
            // Referenced tables cannot be dropped while foreign keys are enforced.
            conn.execute_batch(&format!("PRAGMA foreign_keys = OFF; DROP TABLE {};", table))?;
            Ok(())
        })
        .expect("drop should succeed");
}

pub fn app(state: &AppState) -> Router {
    duochat_api::router(state.clone())
}

pub fn future_exp() -> i64 {
    chrono::Utc::now().timestamp() + 3600
}

pub fn past_exp() -> i64 {
    chrono::Utc::now().timestamp() - 3600
}

pub fn claims(email: &str, hash: &str, exp: i64) -> Claims {
    with_exp(email, hash, exp as f64)
}

pub fn with_exp(email: &str, hash: &str, exp: f64) -> Claims {
    Claims {
        hashed_password: hash.into(),
        email: email.into(),
        exp,
    }
}

/// Token with a real-looking header and an unchecked signature segment.
pub fn unsigned_token(claims: &Claims) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("{}.{}.not-a-signature", header, payload)
}

pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        req = req.header(header::AUTHORIZATION, auth);
    }
    let body = match body {
        Some(body) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let resp = app.oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
