//! Startup reconciliation of the persisted credential with the session.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::{Credential, Identity, SessionError, SessionStore};
use crate::Result;
use crate::storage::{self, CredentialStorage};

/// The identity collaborator's "fetch current identity" operation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identity the credential belongs to.
    ///
    /// `Ok(None)` means the service answered but returned no identity.
    async fn fetch_current_identity(&self, credential: &Credential) -> Result<Option<Identity>>;
}

/// Result of the one-time startup reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    /// Nothing persisted and nothing in memory; no call was made.
    Anonymous,
    /// The persisted credential was accepted and the session resumed.
    Authenticated(Identity),
    /// The persisted credential could not be validated. The session was logged
    /// out and the credential erased.
    Rejected { reason: String },
    /// An identity was held without any persisted credential and was dropped.
    Resynchronized,
    /// The session was already established when bootstrap ran; nothing to do.
    AlreadyAuthenticated,
}

impl BootstrapOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(
            self,
            BootstrapOutcome::Authenticated(_) | BootstrapOutcome::AlreadyAuthenticated
        )
    }
}

/// Reconciles durable storage with the [`SessionStore`] exactly once.
///
/// Every failure mode (network error, timeout, refused or expired credential,
/// malformed or empty response) is treated as "logged out". There is no
/// retry: the user signs in again.
pub struct Bootstrapper {
    store: SessionStore,
    storage: Arc<dyn CredentialStorage>,
    provider: Arc<dyn IdentityProvider>,
    outcome: OnceCell<BootstrapOutcome>,
}

impl Bootstrapper {
    pub fn new(
        store: SessionStore,
        storage: Arc<dyn CredentialStorage>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            store,
            storage,
            provider,
            outcome: OnceCell::new(),
        }
    }

    /// Run the reconciliation, or return the outcome of the run that already happened.
    ///
    /// Concurrent callers share a single run.
    pub async fn run(&self) -> &BootstrapOutcome {
        self.outcome.get_or_init(|| self.reconcile()).await
    }

    /// Outcome of a completed run, `None` while pending or never started.
    pub fn outcome(&self) -> Option<&BootstrapOutcome> {
        self.outcome.get()
    }

    async fn reconcile(&self) -> BootstrapOutcome {
        let persisted = match storage::load_credential(self.storage.as_ref()) {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("Could not read persisted credential, starting anonymous: {e}");
                None
            }
        };
        let has_identity = self.store.identity().is_some();

        match (persisted, has_identity) {
            (None, false) => {
                tracing::debug!("No persisted credential; session stays anonymous");
                BootstrapOutcome::Anonymous
            }
            (None, true) => {
                tracing::info!("Identity held without a persisted credential; logging out");
                self.store.logout();
                BootstrapOutcome::Resynchronized
            }
            (Some(_), true) => BootstrapOutcome::AlreadyAuthenticated,
            (Some(credential), false) => self.resume(credential).await,
        }
    }

    async fn resume(&self, credential: Credential) -> BootstrapOutcome {
        tracing::info!("Initializing session from persisted credential");
        self.store.begin_load();

        let reason = match self.provider.fetch_current_identity(&credential).await {
            Ok(Some(identity)) => {
                self.store.initialize(identity.clone(), credential);
                return BootstrapOutcome::Authenticated(identity);
            }
            Ok(None) => SessionError::EmptyIdentity.to_string(),
            Err(e) => e.to_string(),
        };

        tracing::warn!("Persisted credential rejected, logging out: {reason}");
        super::end_session(&self.store, self.storage.as_ref());
        BootstrapOutcome::Rejected { reason }
    }
}
