//! Session state, the authenticated identity and startup reconciliation.

mod bootstrap;
mod credential;
pub mod errors;
mod identity;
mod role;
mod store;

pub use bootstrap::{BootstrapOutcome, Bootstrapper, IdentityProvider};
pub use credential::Credential;
pub use errors::SessionError;
pub use identity::Identity;
pub use role::{Role, has_admin_role};
pub use store::{Session, SessionOrigin, SessionStatus, SessionStore};

use crate::storage::{self, CredentialStorage};

/// Log the session out and erase the persisted credential.
///
/// The in-memory logout always happens; a storage failure is only logged since
/// the next bootstrap rejects a stale credential anyway.
pub fn end_session(store: &SessionStore, storage: &dyn CredentialStorage) {
    store.logout();
    if let Err(e) = storage::erase_credential(storage) {
        tracing::error!("Failed to erase persisted credential: {e}");
    }
}
