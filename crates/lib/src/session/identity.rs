//! The authenticated user's profile.

use serde::{Deserialize, Serialize};

use super::role::{Role, has_admin_role};

/// Profile of the signed-in user, as reported by the identity service.
///
/// Both the login response and `/api/auth/me` decode into this type. Fields the
/// service adds beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Identity {
    /// Whether any assigned role marks an administrator.
    pub fn is_admin(&self) -> bool {
        has_admin_role(&self.roles)
    }

    /// "First Last" when a first name is known, otherwise the username.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() => format!("{first} {last}"),
            (Some(first), _) if !first.is_empty() => first.to_string(),
            _ => self.username.clone(),
        }
    }

    /// Upper-cased first letter of the first name, `U` when unknown.
    pub fn initial(&self) -> char {
        self.first_name
            .as_deref()
            .and_then(|first| first.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    /// Name to greet the user with: first name, else username.
    pub fn greeting_name(&self) -> &str {
        match self.first_name.as_deref() {
            Some(first) if !first.is_empty() => first,
            _ => &self.username,
        }
    }
}
