pub mod client;
pub mod error;
pub mod page;

pub use client::{ChatClient, Session};
pub use error::ClientError;
pub use page::{AuthGate, ChatPage, ChatroomList, PageState, ProfileGate, View};
