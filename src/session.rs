//! Authenticated session state.
//!
//! The app owns a single [`AuthContext`] and lends it to every screen through
//! the screen context. Screens never write it directly; they return actions
//! (`SignedIn`, `UpdateUser`, `SignOut`) and the app applies them in order, so
//! the last write wins.

use crate::models::{SessionResponse, User};
use tracing::info;

/// A signed-in user and the bearer token issued for them.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"***")
            .finish()
    }
}

impl Session {
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl From<SessionResponse> for Session {
    fn from(response: SessionResponse) -> Self {
        Self::new(response.user, response.token)
    }
}

/// Holds the current session, if any, for the lifetime of the app.
#[derive(Debug, Default)]
pub struct AuthContext {
    session: Option<Session>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session, replacing any previous one.
    pub fn sign_in(&mut self, session: Session) {
        info!("Session started for user {}", session.user.id);
        self.session = Some(session);
    }

    /// End the current session.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Session ended for user {}", session.user.id);
        }
    }

    /// Replace the signed-in user. Ignored when nobody is signed in.
    pub fn update_user(&mut self, user: User) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.user = user;
                true
            }
            None => false,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}
