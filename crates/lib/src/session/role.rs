//! Role representation and the administrator check.

use serde::{Deserialize, Serialize};

use crate::constants::{ADMIN_ROLE_NAMES, ADMIN_ROLE_OBJECT_NAME};

/// A role assigned to an identity.
///
/// The identity service reports roles either as plain names (login responses)
/// or as role records with a `name` field (`/api/auth/me`). Any other fields of
/// a role record are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Role {
    Plain(String),
    Named { name: String },
}

impl Role {
    /// The comparable role name, whatever the representation.
    pub fn name(&self) -> &str {
        match self {
            Role::Plain(name) | Role::Named { name } => name,
        }
    }

    /// Whether this role marks an administrator.
    ///
    /// Matching is exact and case-sensitive. Plain names accept `ROLE_ADMIN` and
    /// `admin`; role records accept only `ROLE_ADMIN`.
    pub fn is_admin_marker(&self) -> bool {
        match self {
            Role::Plain(name) => ADMIN_ROLE_NAMES.contains(&name.as_str()),
            Role::Named { name } => name == ADMIN_ROLE_OBJECT_NAME,
        }
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Role::Plain(name.to_string())
    }
}

/// True if any role in the collection marks an administrator.
pub fn has_admin_role(roles: &[Role]) -> bool {
    roles.iter().any(Role::is_admin_marker)
}
