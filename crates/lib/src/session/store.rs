//! Process-wide session state container.
//!
//! The store performs no network or storage access. Persisting or erasing the
//! credential is the caller's job (see [`crate::auth::AuthFlow`] and
//! [`super::Bootstrapper`]).

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::{Credential, Identity};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No authentication has been attempted, or the session was logged out.
    #[default]
    Uninitialized,
    /// A persisted credential is being checked against the identity service.
    Loading,
    Ready,
    Error,
}

/// How the current identity was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOrigin {
    /// Fresh login or signup in this process.
    Login,
    /// Recovered from a persisted credential at startup.
    Resumed,
}

/// The authentication state of the running client.
///
/// Invariant: `identity` is present if and only if `credential` is present.
#[derive(Debug, Clone, Default)]
pub struct Session {
    credential: Option<Credential>,
    identity: Option<Identity>,
    status: SessionStatus,
    error_message: Option<String>,
    origin: Option<SessionOrigin>,
}

impl Session {
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Diagnostic message, only present in [`SessionStatus::Error`].
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn origin(&self) -> Option<SessionOrigin> {
        self.origin
    }

    /// `Ready` with an identity.
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Ready && self.identity.is_some()
    }

    /// Authenticated and holding an administrator role.
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.identity.as_ref().is_some_and(Identity::is_admin)
    }

    /// Identity and credential are set together or not at all.
    pub fn is_consistent(&self) -> bool {
        self.identity.is_some() == self.credential.is_some()
    }

    fn establish(&mut self, identity: Identity, credential: Credential, origin: SessionOrigin) {
        self.identity = Some(identity);
        self.credential = Some(credential);
        self.status = SessionStatus::Ready;
        self.error_message = None;
        self.origin = Some(origin);
    }

    fn clear(&mut self) {
        self.identity = None;
        self.credential = None;
        self.origin = None;
    }
}

/// Shared handle to the single [`Session`] of a running client.
///
/// Cloning the store clones the handle, not the session. Each operation is
/// applied atomically; observers can [`subscribe`](Self::subscribe) to changes.
#[derive(Clone, Debug)]
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
}

impl SessionStore {
    /// Create a store holding an uninitialized session.
    pub fn new() -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            state: Arc::new(state),
        }
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.state.borrow().credential.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receive every subsequent session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Mark a reconciliation as outstanding. Idempotent.
    pub fn begin_load(&self) {
        self.apply("begin_load", |session| {
            session.status = SessionStatus::Loading;
            session.error_message = None;
        });
    }

    /// Record a fresh login. Does not persist the credential.
    pub fn login_succeeded(&self, identity: Identity, credential: Credential) {
        tracing::info!("Session established for '{}'", identity.username);
        self.apply("login_succeeded", |session| {
            session.establish(identity, credential, SessionOrigin::Login);
        });
    }

    /// Record a failed login attempt.
    pub fn login_failed(&self, message: impl Into<String>) {
        let message = message.into();
        self.apply("login_failed", |session| {
            session.clear();
            session.status = SessionStatus::Error;
            session.error_message = Some(message);
        });
    }

    /// Record a session resumed from a persisted credential.
    pub fn initialize(&self, identity: Identity, credential: Credential) {
        tracing::info!("Session resumed for '{}'", identity.username);
        self.apply("initialize", |session| {
            session.establish(identity, credential, SessionOrigin::Resumed);
        });
    }

    /// Drop identity and credential and return to the anonymous resting state.
    pub fn logout(&self) {
        self.apply("logout", |session| {
            session.clear();
            session.status = SessionStatus::Uninitialized;
            session.error_message = None;
        });
    }

    fn apply(&self, operation: &'static str, change: impl FnOnce(&mut Session)) {
        self.state.send_modify(|session| {
            change(session);
            debug_assert!(
                session.is_consistent(),
                "session inconsistent after {operation}"
            );
            tracing::debug!(operation, status = ?session.status, "Session updated");
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
