//! Error types for the backend service clients

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (refused, reset, timed out).
    #[error("Could not reach {url}: {reason}")]
    Network { url: String, reason: String },

    /// The backend answered with a non-success status.
    #[error("{service} service returned {status}: {message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The backend answered successfully but the body did not decode.
    #[error("Unexpected response from {service} service: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },

    #[error("Invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {reason}")]
    Client { reason: String },
}

impl ApiError {
    /// Check if the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the backend refused the credential.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Check if the backend could not be reached at all.
    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    /// HTTP status of a backend rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message fit for the user: the backend's own words for a rejection.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network { .. } => {
                "The service is unavailable. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Pull the human-readable message out of an error response body.
///
/// Tries the JSON `message` field, then `error`, then the raw body text, and
/// finally the status reason phrase.
pub(crate) fn extract_message(body: &str, reason: Option<&str>, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str())
                && !text.trim().is_empty()
            {
                return text.to_string();
            }
        }
    }
    let body = body.trim();
    if !body.is_empty() && !body.starts_with('{') {
        return body.to_string();
    }
    reason
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

impl From<ApiError> for crate::Error {
    fn from(err: ApiError) -> Self {
        crate::Error::Api(err)
    }
}
