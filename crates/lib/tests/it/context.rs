//! Test context for managing test setup and lifecycle.
//!
//! Provides a composable `TestContext` that explicitly shows what each test
//! needs: a fake backend, a pre-seeded credential, file-backed storage.

use std::sync::Arc;

use pragyan::{
    AuthFlow, BankClient, Bootstrapper, ClientConfig, ServiceEndpoints, SessionStore,
    constants::CREDENTIAL_KEY,
    storage::{CredentialStorage, FileStorage, MemoryStorage},
};
use tempfile::TempDir;

use crate::helpers::{FakeBank, endpoints_for, unreachable_endpoints};

/// One client wired the way the binary wires it.
pub struct TestContext {
    pub store: SessionStore,
    pub storage: Arc<dyn CredentialStorage>,
    pub bank: BankClient,
    pub fake: Option<FakeBank>,
    // Keeps file-backed storage alive for the test's duration
    _data_dir: Option<TempDir>,
}

pub struct TestContextBuilder {
    fake: Option<FakeBank>,
    credential: Option<String>,
    file_storage: bool,
}

impl TestContext {
    pub fn builder() -> TestContextBuilder {
        TestContextBuilder {
            fake: None,
            credential: None,
            file_storage: false,
        }
    }

    pub fn bootstrapper(&self) -> Bootstrapper {
        Bootstrapper::new(
            self.store.clone(),
            Arc::clone(&self.storage),
            Arc::new(self.bank.identity.clone()),
        )
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(
            self.store.clone(),
            Arc::clone(&self.storage),
            self.bank.identity.clone(),
        )
    }

    pub fn fake(&self) -> &FakeBank {
        self.fake.as_ref().expect("context has no fake backend")
    }

    pub fn persisted_credential(&self) -> Option<String> {
        self.storage.get(CREDENTIAL_KEY).unwrap()
    }
}

impl TestContextBuilder {
    /// Serve a fresh [`FakeBank`] and point every service at it.
    pub fn with_fake_backend(mut self) -> Self {
        self.fake = Some(FakeBank::default());
        self
    }

    /// Seed storage with a persisted credential.
    pub fn with_credential(mut self, credential: &str) -> Self {
        self.credential = Some(credential.to_string());
        self
    }

    pub fn with_file_storage(mut self) -> Self {
        self.file_storage = true;
        self
    }

    pub async fn build(self) -> TestContext {
        let endpoints: ServiceEndpoints = match &self.fake {
            Some(fake) => endpoints_for(fake.spawn().await),
            None => unreachable_endpoints(),
        };

        let (storage, data_dir): (Arc<dyn CredentialStorage>, _) = if self.file_storage {
            let dir = tempfile::tempdir().unwrap();
            let storage = FileStorage::open(dir.path().join("client-storage.json")).unwrap();
            (Arc::new(storage), Some(dir))
        } else {
            (Arc::new(MemoryStorage::new()), None)
        };
        if let Some(credential) = &self.credential {
            storage.set(CREDENTIAL_KEY, credential).unwrap();
        }

        let config = ClientConfig {
            endpoints,
            ..ClientConfig::default()
        };
        let bank = BankClient::new(&config, Arc::clone(&storage)).unwrap();

        TestContext {
            store: SessionStore::new(),
            storage,
            bank,
            fake: self.fake,
            _data_dir: data_dir,
        }
    }
}
