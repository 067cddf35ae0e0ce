//! Session handling.
//!
//! The [`AuthGate`] owns the current [`Session`] and hands it to every
//! authenticated call. Tokens are persisted through a [`SessionStore`] so a
//! restart does not force a new login.

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::api::{Credentials, SportsbookApi};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Holds the session token and writes it through to storage.
pub struct AuthGate {
    store: Box<dyn SessionStore>,
    session: Option<Session>,
}

impl AuthGate {
    /// Create a gate, restoring any persisted session.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let session = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable session: {}", e);
                None
            }
        };
        Self { store, session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, or an auth error when logged out.
    pub fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| Error::auth("Please log in first"))
    }

    /// Log in and persist the returned token.
    pub async fn login(&mut self, api: &dyn SportsbookApi, credentials: &Credentials) -> Result<()> {
        let session = api.login(credentials).await?;
        self.establish(session)
    }

    /// Register a new account and persist the returned token.
    pub async fn register(
        &mut self,
        api: &dyn SportsbookApi,
        credentials: &Credentials,
    ) -> Result<()> {
        let session = api.register(credentials).await?;
        self.establish(session)
    }

    /// Forget the session, locally and in storage.
    pub fn logout(&mut self) -> Result<()> {
        self.session = None;
        self.store.clear()
    }

    /// Adopt a session obtained elsewhere and persist it.
    pub fn establish(&mut self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        self.session = Some(session);
        tracing::info!("Session established");
        Ok(())
    }
}
