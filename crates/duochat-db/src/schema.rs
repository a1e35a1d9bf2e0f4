use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

/// Create the tables this service reads if they are missing.
///
/// The schema is owned by whatever writes users, chatrooms and messages; this
/// only guarantees that a fresh database file can be opened and queried.
pub fn ensure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS auth_user (
            id          INTEGER PRIMARY KEY,
            email       TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS chatrooms (
            chatroom_id INTEGER PRIMARY KEY,
            user_id_1   INTEGER NOT NULL REFERENCES auth_user(id),
            user_id_2   INTEGER NOT NULL REFERENCES auth_user(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS messages (
            message_id  INTEGER PRIMARY KEY,
            chatroom_id INTEGER NOT NULL REFERENCES chatrooms(chatroom_id),
            sender_id   INTEGER NOT NULL REFERENCES auth_user(id),
            content     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_messages_chatroom
            ON messages(chatroom_id);
        ",
    )?;

    debug!("Database schema present");
    Ok(())
}
