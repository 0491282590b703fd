//! Error types for sessions and authentication

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// The identity service refused a login attempt. The message is the service's own.
    #[error("{message}")]
    LoginRejected { message: String },

    /// The identity service refused a signup. The message is the service's own.
    #[error("{message}")]
    SignupRejected { message: String },

    #[error("Identity service returned no identity for the credential")]
    EmptyIdentity,
}

impl SessionError {
    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            SessionError::LoginRejected { .. } | SessionError::EmptyIdentity
        )
    }
}

impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = SessionError::LoginRejected {
            message: "Bad credentials".to_string(),
        };
        assert!(err.is_authentication_error());
        assert_eq!(err.to_string(), "Bad credentials");

        let err = SessionError::SignupRejected {
            message: "Error: Username is already taken!".to_string(),
        };
        assert!(!err.is_authentication_error());

        let err: crate::Error = SessionError::EmptyIdentity.into();
        assert_eq!(err.module(), "session");
        assert!(err.is_authentication_error());
    }
}
