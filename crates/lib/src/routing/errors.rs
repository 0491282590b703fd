//! Error types for routing

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route for path: {path}")]
    UnknownPath { path: String },
}

impl RouteError {
    /// Check if the path did not match any route.
    pub fn is_unknown_path(&self) -> bool {
        matches!(self, RouteError::UnknownPath { .. })
    }
}

impl From<RouteError> for crate::Error {
    fn from(err: RouteError) -> Self {
        crate::Error::Route(err)
    }
}
