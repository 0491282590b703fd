//! The opaque bearer credential.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token issued by the identity service.
///
/// The value is opaque to the client. It is never printed: `Debug` redacts it,
/// and the backing buffer is wiped when the credential is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token string.
    ///
    /// Returns `None` for an empty or all-whitespace token, which the client
    /// treats the same as no credential at all.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
