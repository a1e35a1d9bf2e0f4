use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

use duochat_db::models::{ChatroomRow, MessageRow};
use duochat_types::models::{Chatroom, Message};

pub fn message_from_row(row: MessageRow) -> Message {
    Message {
        created_at: parse_timestamp(&row.created_at, "message", row.message_id),
        message_id: row.message_id,
        chatroom_id: row.chatroom_id,
        sender_id: row.sender_id,
        content: row.content,
    }
}

pub fn chatroom_from_row(row: ChatroomRow) -> Chatroom {
    Chatroom {
        created_at: parse_timestamp(&row.created_at, "chatroom", row.chatroom_id),
        chatroom_id: row.chatroom_id,
        user_id_1: row.user_id_1,
        user_id_2: row.user_id_2,
    }
}

fn parse_timestamp(raw: &str, kind: &str, id: i64) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
            // Parse as naive UTC and convert.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt created_at '{}' on {} '{}': {}", raw, kind, id, e);
            DateTime::default()
        })
}
