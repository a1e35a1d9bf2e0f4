use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An unordered pairing of two users. Created elsewhere, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chatroom {
    pub chatroom_id: i64,
    pub user_id_1: i64,
    pub user_id_2: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chatroom_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
