//! Controller for the chat landing page.
//!
//! The page sits behind two gates (signed in, profile complete), loads the
//! session's chatrooms once, and hands them to a [`ChatroomList`] renderer.
//! Loading is tied to explicit `load`/`refresh` calls, never to rendering.

use tracing::error;

use duochat_types::models::Chatroom;

use crate::client::{ChatClient, Session};

/// Decides whether there is a signed-in session at all.
pub trait AuthGate {
    fn is_authenticated(&self, session: Option<&Session>) -> bool;
}

/// Decides whether the signed-in user has finished their profile.
pub trait ProfileGate {
    fn is_complete(&self, session: &Session) -> bool;
}

/// Renders the loaded chatrooms, e.g. a live-updating list view.
pub trait ChatroomList {
    type Output;

    fn render(&self, chatrooms: &[Chatroom]) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Loaded(Vec<Chatroom>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<T> {
    /// The authentication gate refused the session.
    SignIn,
    /// The profile gate refused the session.
    CompleteProfile,
    /// Placeholder until chatrooms arrive.
    Loading,
    Chatrooms(T),
}

pub struct ChatPage<A, P, L> {
    client: ChatClient,
    auth: A,
    profile: P,
    list: L,
    state: PageState,
}

impl<A, P, L> ChatPage<A, P, L>
where
    A: AuthGate,
    P: ProfileGate,
    L: ChatroomList,
{
    pub fn new(client: ChatClient, auth: A, profile: P, list: L) -> Self {
        Self {
            client,
            auth,
            profile,
            list,
            state: PageState::Loading,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Fetch chatrooms unless they are already loaded. Returns whether a
    /// request was issued.
    pub async fn load(&mut self, session: Option<&Session>) -> bool {
        if matches!(self.state, PageState::Loaded(_)) {
            return false;
        }
        self.refresh(session).await
    }

    /// Re-issue the chatroom fetch. On failure the error is logged and the
    /// current state is kept; there is no retry.
    pub async fn refresh(&mut self, session: Option<&Session>) -> bool {
        let Ok(session) = self.gate(session) else {
            return false;
        };

        match self.client.find_user_chats(session).await {
            Ok(chatrooms) => self.state = PageState::Loaded(chatrooms),
            Err(e) => error!("Error: {}", e),
        }
        true
    }

    pub fn render(&self, session: Option<&Session>) -> View<L::Output> {
        if let Err(redirect) = self.gate(session) {
            return redirect;
        }

        match &self.state {
            PageState::Loading => View::Loading,
            PageState::Loaded(chatrooms) => View::Chatrooms(self.list.render(chatrooms)),
        }
    }

    /// Both `render` and `refresh` go through here, so a page never shows
    /// chatrooms it would refuse to fetch. No session means signed out, even
    /// if the auth gate lets `None` through.
    fn gate<'s>(&self, session: Option<&'s Session>) -> Result<&'s Session, View<L::Output>> {
        let session = match session {
            Some(session) if self.auth.is_authenticated(Some(session)) => session,
            _ => return Err(View::SignIn),
        };
        if !self.profile.is_complete(session) {
            return Err(View::CompleteProfile);
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gate(bool);

    impl AuthGate for Gate {
        fn is_authenticated(&self, session: Option<&Session>) -> bool {
            self.0 && session.is_some()
        }
    }

    impl ProfileGate for Gate {
        fn is_complete(&self, _session: &Session) -> bool {
            self.0
        }
    }

    /// Auth gate for hosts that treat an absent session as anonymous access.
    struct Anonymous;

    impl AuthGate for Anonymous {
        fn is_authenticated(&self, _session: Option<&Session>) -> bool {
            true
        }
    }

    struct Count;

    impl ChatroomList for Count {
        type Output = usize;

        fn render(&self, chatrooms: &[Chatroom]) -> usize {
            chatrooms.len()
        }
    }

    // Nothing listens here; gated pages must never get as far as a request.
    fn page(auth: bool, profile: bool) -> ChatPage<Gate, Gate, Count> {
        ChatPage::new(ChatClient::new("http://127.0.0.1:9"), Gate(auth), Gate(profile), Count)
    }

    #[test]
    fn starts_loading() {
        let page = page(true, true);
        assert_eq!(page.state(), &PageState::Loading);
        assert_eq!(page.render(Some(&Session::new("t"))), View::Loading);
    }

    #[test]
    fn gates_decide_the_view() {
        let session = Session::new("t");
        assert_eq!(page(false, true).render(Some(&session)), View::SignIn);
        assert_eq!(page(true, true).render(None), View::SignIn);
        assert_eq!(page(true, false).render(Some(&session)), View::CompleteProfile);
    }

    #[tokio::test]
    async fn missing_session_is_signed_out_even_if_gate_allows_it() {
        let mut page = ChatPage::new(
            ChatClient::new("http://127.0.0.1:9"),
            Anonymous,
            Gate(true),
            Count,
        );

        assert_eq!(page.render(None), View::SignIn);
        assert!(!page.load(None).await);
        assert_eq!(page.render(None), View::SignIn);
    }

    #[tokio::test]
    async fn gated_pages_do_not_fetch() {
        let session = Session::new("t");

        let mut signed_out = page(true, true);
        assert!(!signed_out.load(None).await);

        let mut incomplete = page(true, false);
        assert!(!incomplete.load(Some(&session)).await);
        assert_eq!(incomplete.state(), &PageState::Loading);
    }

    #[tokio::test]
    async fn transport_failure_stays_loading() {
        let session = Session::new("t");
        let mut page = page(true, true);

        assert!(page.load(Some(&session)).await);
        assert_eq!(page.state(), &PageState::Loading);
        assert_eq!(page.render(Some(&session)), View::Loading);
    }
}
