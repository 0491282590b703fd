//! Identity service: login, signup and the current user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::Result;
use crate::constants::SIGNUP_ROLE;
use crate::session::{Credential, Identity, IdentityProvider, Role};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login: the credential plus a summary of the identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl LoginResponse {
    /// The identity as the session records it after a login.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            first_name: None,
            last_name: None,
            email: self.email.clone(),
            phone_number: None,
            roles: self.roles.clone(),
        }
    }
}

/// Registration details collected by the signup form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub roles: Vec<String>,
}

impl SignupRequest {
    /// A request for a new customer account.
    pub fn customer(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number,
            roles: vec![SIGNUP_ROLE.to_string()],
        }
    }
}

/// Signup answer. Some deployments log the new user straight in and include a
/// token; others only confirm the registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl SignupResponse {
    /// Credential and identity when the response logs the user in.
    pub fn session(&self) -> Option<(Identity, Credential)> {
        let credential = Credential::new(self.token.clone()?)?;
        let identity = Identity {
            id: self.id?,
            username: self.username.clone()?,
            first_name: None,
            last_name: None,
            email: self.email.clone(),
            phone_number: None,
            roles: self.roles.clone(),
        };
        Some((identity, credential))
    }
}

/// Client of the identity service.
#[derive(Clone, Debug)]
pub struct IdentityApi {
    client: ServiceClient,
}

impl IdentityApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.client
            .post(&["api", "auth", "login"], &LoginRequest { username, password })
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.client.post(&["api", "auth", "signup"], request).await
    }

    /// The identity the credential belongs to, `None` for an empty answer.
    pub async fn current_identity(&self, credential: &Credential) -> Result<Option<Identity>> {
        self.client.get_optional_as(&["api", "auth", "me"], credential).await
    }
}

#[async_trait]
impl IdentityProvider for IdentityApi {
    async fn fetch_current_identity(&self, credential: &Credential) -> Result<Option<Identity>> {
        self.current_identity(credential).await
    }
}
