//! Durable client-side key/value storage.
//!
//! The client keeps exactly one durable entry, the bearer credential under
//! [`CREDENTIAL_KEY`]; its absence means the client is anonymous. Storage is
//! pluggable: [`FileStorage`] persists to a JSON file in the data directory,
//! [`MemoryStorage`] lives and dies with the process.

use std::fmt::Debug;

use crate::Result;
use crate::constants::CREDENTIAL_KEY;
use crate::session::Credential;

pub mod errors;
mod file;
mod memory;

pub use errors::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Named string entries that survive for as long as the implementation allows.
pub trait CredentialStorage: Send + Sync + Debug {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// The persisted credential, if one exists and is non-blank.
pub fn load_credential(storage: &dyn CredentialStorage) -> Result<Option<Credential>> {
    Ok(storage.get(CREDENTIAL_KEY)?.and_then(Credential::new))
}

/// Persist the credential so the session survives a restart.
pub fn persist_credential(storage: &dyn CredentialStorage, credential: &Credential) -> Result<()> {
    storage.set(CREDENTIAL_KEY, credential.expose())
}

/// Erase the persisted credential.
pub fn erase_credential(storage: &dyn CredentialStorage) -> Result<()> {
    storage.remove(CREDENTIAL_KEY)
}

/// Whether a usable credential is persisted. Read failures count as absent.
pub fn has_persisted_credential(storage: &dyn CredentialStorage) -> bool {
    match load_credential(storage) {
        Ok(credential) => credential.is_some(),
        Err(e) => {
            tracing::warn!("Failed to read persisted credential: {e}");
            false
        }
    }
}
