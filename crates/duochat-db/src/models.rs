//! Rows as stored in SQLite. Timestamps stay as text here; the API layer
//! converts rows into duochat-types models.

#[derive(Debug)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct ChatroomRow {
    pub chatroom_id: i64,
    pub user_id_1: i64,
    pub user_id_2: i64,
    pub created_at: String,
}

#[derive(Debug)]
pub struct MessageRow {
    pub message_id: i64,
    pub chatroom_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: String,
}
