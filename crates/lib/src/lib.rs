//!
//! Pragyan: the session-aware client of the Pragyan multi-service banking demo.
//! This library provides the core components every front end of the client shares.
//!
//! ## Core Concepts
//!
//! * **Session (`session::Session`)**: The single authentication state of a running client:
//!   credential, identity, status and the last error. Held by a [`session::SessionStore`],
//!   a pure state container with no I/O of its own.
//! * **Credential storage (`storage::CredentialStorage`)**: Durable key/value storage that keeps
//!   the bearer credential across restarts under the fixed key [`constants::CREDENTIAL_KEY`].
//! * **Bootstrapper (`session::Bootstrapper`)**: Reconciles a persisted credential with the
//!   identity service exactly once per process.
//! * **Routing (`routing`)**: The static route table and the authentication/role gate evaluated
//!   on every navigation.
//! * **Service clients (`api`)**: One typed client per backend origin (auth, accounts and
//!   transactions, credit cards, gift cards, loans, lockers), all attaching the bearer credential.
//! * **Auth flow (`auth::AuthFlow`)**: Login, signup and logout, the only actions that change
//!   the session.
//!
//! Role gating in this crate is a navigation convenience. The backend services enforce access
//! control on every request; nothing here is a security boundary.

pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod routing;
pub mod session;
pub mod storage;
pub mod validation;

pub use api::BankClient;
pub use auth::AuthFlow;
pub use config::{ClientConfig, ServiceEndpoints};
pub use session::{Bootstrapper, Credential, Identity, Role, Session, SessionStatus, SessionStore};

/// Result type used throughout the Pragyan library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Pragyan library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured errors from the backend service clients
    #[error(transparent)]
    Api(api::ApiError),

    /// Structured session and authentication errors
    #[error(transparent)]
    Session(session::SessionError),

    /// Structured credential storage errors
    #[error(transparent)]
    Storage(storage::StorageError),

    /// Structured routing errors
    #[error(transparent)]
    Route(routing::RouteError),

    /// Client-side form validation failures
    #[error(transparent)]
    Validation(validation::ValidationError),

    /// Invalid client configuration
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Api(_) => "api",
            Error::Session(_) => "session",
            Error::Storage(_) => "storage",
            Error::Route(_) => "routing",
            Error::Validation(_) => "validation",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Api(api_err) => api_err.is_not_found(),
            Error::Route(route_err) => route_err.is_unknown_path(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    ///
    /// Covers credentials the identity service refused as well as
    /// 401/403 responses from any backend.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Api(api_err) => api_err.is_authentication_error(),
            Error::Session(session_err) => session_err.is_authentication_error(),
            _ => false,
        }
    }

    /// Check if this error is a client-side validation failure.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error means a backend could not be reached.
    pub fn is_network_error(&self) -> bool {
        match self {
            Error::Api(api_err) => api_err.is_network_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Storage(storage_err) => storage_err.is_io_error(),
            _ => false,
        }
    }

    /// The message to show a user for this error.
    ///
    /// Backend rejections carry the service's own message verbatim; everything
    /// else falls back to the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(api_err) => api_err.user_message(),
            Error::Session(session_err) => session_err.to_string(),
            other => other.to_string(),
        }
    }
}
