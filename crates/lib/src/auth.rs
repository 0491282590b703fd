//! Login, signup and logout.
//!
//! These are the only user actions that change the session. Each keeps the
//! [`SessionStore`] and the persisted credential in step.

use std::sync::Arc;

use serde::Deserialize;

use crate::api::{ApiError, IdentityApi, identity::SignupRequest};
use crate::session::{self, Credential, Identity, SessionError, SessionStore};
use crate::storage::{self, CredentialStorage};
use crate::validation::{self, ValidationError};
use crate::{Error, Result};

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const REGISTERED: &str = "Account created successfully! Please sign in.";

/// Fields of the signup form.
///
/// Deserializes from a submitted form; absent fields are blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
}

/// What a successful signup led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// The service logged the new user straight in.
    SignedIn(Identity),
    /// The account exists; the user still has to log in.
    Registered { message: String },
}

/// Drives the session through login, signup and logout.
#[derive(Clone, Debug)]
pub struct AuthFlow {
    store: SessionStore,
    storage: Arc<dyn CredentialStorage>,
    identity: IdentityApi,
}

impl AuthFlow {
    pub fn new(
        store: SessionStore,
        storage: Arc<dyn CredentialStorage>,
        identity: IdentityApi,
    ) -> Self {
        Self {
            store,
            storage,
            identity,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Exchange username and password for a session.
    ///
    /// Blank fields fail validation without contacting the service. A refused
    /// login leaves the session in `Error` with the service's message.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity> {
        let username = validation::require("username", username)?;
        // Passwords are sent as typed, surrounding whitespace included.
        validation::require("password", password)?;

        let response = match self.identity.login(username, password).await {
            Ok(response) => response,
            Err(e) => {
                let message = rejection_message(&e, LOGIN_FAILED);
                tracing::info!("Login for '{username}' refused: {e}");
                self.store.login_failed(message.clone());
                return Err(SessionError::LoginRejected { message }.into());
            }
        };

        let Some(credential) = Credential::new(response.token.clone()) else {
            tracing::warn!("Login response for '{username}' carried no credential");
            self.store.login_failed(LOGIN_FAILED);
            return Err(SessionError::LoginRejected {
                message: LOGIN_FAILED.to_string(),
            }
            .into());
        };

        let identity = response.identity();
        self.establish(identity.clone(), credential);
        Ok(identity)
    }

    /// Register a new customer.
    pub async fn signup(&self, form: &SignupForm) -> Result<SignupOutcome> {
        let username = validation::require("username", &form.username)?;
        let email = validation::require("email", &form.email)?;
        validation::require("password", &form.password)?;
        let first_name = validation::require("firstName", &form.first_name)?;
        let last_name = validation::require("lastName", &form.last_name)?;
        if form.password != form.confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }

        let request = SignupRequest::customer(
            username,
            email,
            form.password.as_str(),
            first_name,
            last_name,
            validation::optional(form.phone_number.as_deref()),
        );
        let response = self.identity.signup(&request).await.map_err(|e| {
            tracing::info!("Signup for '{username}' refused: {e}");
            SessionError::SignupRejected {
                message: rejection_message(&e, SIGNUP_FAILED),
            }
        })?;

        match response.session() {
            Some((identity, credential)) => {
                self.establish(identity.clone(), credential);
                Ok(SignupOutcome::SignedIn(identity))
            }
            None => {
                tracing::info!("Registered '{username}'");
                Ok(SignupOutcome::Registered {
                    message: response.message.unwrap_or_else(|| REGISTERED.to_string()),
                })
            }
        }
    }

    /// End the session and erase the persisted credential, whatever the current status.
    pub fn logout(&self) {
        tracing::info!("Logging out");
        session::end_session(&self.store, self.storage.as_ref());
    }

    fn establish(&self, identity: Identity, credential: Credential) {
        // The session still works for this process if persisting fails.
        if let Err(e) = storage::persist_credential(self.storage.as_ref(), &credential) {
            tracing::error!("Failed to persist credential: {e}");
        }
        self.store.login_succeeded(identity, credential);
    }
}

/// The service's own message for a rejection, `fallback` for anything else.
fn rejection_message(err: &Error, fallback: &str) -> String {
    match err {
        Error::Api(ApiError::Status { message, .. }) if !message.trim().is_empty() => {
            message.clone()
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ServiceClient;
    use crate::storage::MemoryStorage;

    fn flow() -> (AuthFlow, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        // Nothing listens here; validation must fail before any request.
        let url = url::Url::parse("http://127.0.0.1:9").unwrap();
        let client = ServiceClient::new("auth", &url, reqwest::Client::new(), storage.clone());
        let flow = AuthFlow::new(SessionStore::new(), storage.clone(), IdentityApi::new(client));
        (flow, storage)
    }

    #[tokio::test]
    async fn blank_login_fields_fail_validation() {
        let (flow, _) = flow();
        let err = flow.login("alice", "  ").await.unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(flow.store().snapshot().error_message(), None);
    }

    #[tokio::test]
    async fn mismatched_passwords_fail_before_the_request() {
        let (flow, _) = flow();
        let form = SignupForm {
            username: "bob".to_string(),
            email: "bob@x.test".to_string(),
            password: "one".to_string(),
            confirm_password: "two".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Lee".to_string(),
            phone_number: None,
        };
        let err = flow.signup(&form).await.unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn logout_erases_the_credential() {
        let (flow, storage) = flow();
        storage
            .set(crate::constants::CREDENTIAL_KEY, "tok-123")
            .unwrap();
        flow.logout();
        assert!(!crate::storage::has_persisted_credential(storage.as_ref()));
        assert!(!flow.store().is_authenticated());
    }

    #[test]
    fn rejection_message_prefers_backend_text() {
        let err: Error = ApiError::Status {
            service: "auth",
            status: 401,
            message: "Bad credentials".to_string(),
        }
        .into();
        assert_eq!(rejection_message(&err, LOGIN_FAILED), "Bad credentials");

        let err: Error = ApiError::Network {
            url: "http://localhost:8081".to_string(),
            reason: "refused".to_string(),
        }
        .into();
        assert_eq!(rejection_message(&err, LOGIN_FAILED), LOGIN_FAILED);
    }
}
