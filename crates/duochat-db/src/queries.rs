use crate::Database;
use crate::models::{ChatroomRow, MessageRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

impl Database {
    // -- Users --

    /// Look up the user whose email and stored password hash both match.
    pub fn find_user_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_credentials(conn, email, password_hash))
    }

    // -- Chatrooms --

    /// Every chatroom in which `user_id` is either participant.
    pub fn get_chatrooms_for_user(&self, user_id: i64) -> Result<Vec<ChatroomRow>> {
        self.with_conn(|conn| query_chatrooms_for_user(conn, user_id))
    }

    // -- Messages --

    /// All messages of a chatroom, in storage order.
    ///
    /// `chatroom_id` is bound as given; SQLite's column affinity decides what
    /// matches, so `"10"` finds room 10 and `"general"` finds nothing.
    pub fn get_messages(&self, chatroom_id: &Value) -> Result<Vec<MessageRow>> {
        let key = sql_key(chatroom_id);
        self.with_conn(|conn| query_messages(conn, &key))
    }
}

fn query_user_by_credentials(
    conn: &Connection,
    email: &str,
    password_hash: &str,
) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, email, password FROM auth_user WHERE email = ?1 AND password = ?2")?;

    let row = stmt
        .query_row([email, password_hash], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_chatrooms_for_user(conn: &Connection, user_id: i64) -> Result<Vec<ChatroomRow>> {
    let mut stmt = conn.prepare(
        "SELECT chatroom_id, user_id_1, user_id_2, created_at
         FROM chatrooms
         WHERE user_id_1 = ?1 OR user_id_2 = ?1",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(ChatroomRow {
                chatroom_id: row.get(0)?,
                user_id_1: row.get(1)?,
                user_id_2: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_messages(conn: &Connection, chatroom_id: &SqlValue) -> Result<Vec<MessageRow>> {
    // No ORDER BY: rows come back exactly as stored.
    let mut stmt = conn.prepare(
        "SELECT message_id, chatroom_id, sender_id, content, created_at
         FROM messages
         WHERE chatroom_id = ?1",
    )?;

    let rows = stmt
        .query_map([chatroom_id], |row| {
            Ok(MessageRow {
                message_id: row.get(0)?,
                chatroom_id: row.get(1)?,
                sender_id: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Map a JSON scalar onto the SQLite value it would be stored as. Arrays and
/// objects are bound as their JSON text.
fn sql_key(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
