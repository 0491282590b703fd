//! HTTP plumbing shared by every per-service client.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::ApiError;
use super::errors::extract_message;
use crate::Result;
use crate::constants::REQUEST_ID_HEADER;
use crate::session::Credential;
use crate::storage::{self, CredentialStorage};

/// One backend origin.
///
/// The bearer credential is read from storage on every request, so a login or
/// logout elsewhere in the process takes effect on the next call.
#[derive(Clone, Debug)]
pub struct ServiceClient {
    service: &'static str,
    base_url: Url,
    http: Client,
    storage: Arc<dyn CredentialStorage>,
}

impl ServiceClient {
    pub fn new(
        service: &'static str,
        base_url: &Url,
        http: Client,
        storage: Arc<dyn CredentialStorage>,
    ) -> Self {
        Self {
            service,
            base_url: base_url.clone(),
            http,
            storage,
        }
    }

    /// Service name used in errors and logs.
    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let request = self.http.get(self.url(path)?);
        let body = self.execute(request, self.stored_credential()).await?;
        self.decode(&body)
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &[&str],
        payload: &B,
    ) -> Result<T> {
        let request = self.http.post(self.url(path)?).json(payload);
        let body = self.execute(request, self.stored_credential()).await?;
        self.decode(&body)
    }

    /// POST without a request body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let request = self.http.post(self.url(path)?);
        let body = self.execute(request, self.stored_credential()).await?;
        self.decode(&body)
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &[&str],
        payload: &B,
    ) -> Result<T> {
        let request = self.http.put(self.url(path)?).json(payload);
        let body = self.execute(request, self.stored_credential()).await?;
        self.decode(&body)
    }

    /// PUT without a request body.
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let request = self.http.put(self.url(path)?);
        let body = self.execute(request, self.stored_credential()).await?;
        self.decode(&body)
    }

    /// GET with an explicit credential instead of the stored one.
    ///
    /// An empty body or JSON `null` decodes to `None`.
    pub(crate) async fn get_optional_as<T: DeserializeOwned>(
        &self,
        path: &[&str],
        credential: &Credential,
    ) -> Result<Option<T>> {
        let request = self.http.get(self.url(path)?);
        let body = self.execute(request, Some(credential.clone())).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        self.decode(&body)
    }

    /// The endpoint URL. Each segment is percent-encoded on its own, so a
    /// `/`, `?` or `#` inside an identifier stays part of that identifier.
    ///
    /// Empty, `.` and `..` segments are refused since they would address a
    /// different endpoint.
    pub(crate) fn url(&self, path: &[&str]) -> Result<Url> {
        if let Some(segment) = path
            .iter()
            .find(|segment| matches!(segment.trim(), "" | "." | ".."))
        {
            return Err(ApiError::InvalidUrl {
                url: format!("{}/{}", self.base_url(), path.join("/")),
                reason: format!("'{segment}' is not a valid path segment"),
            }
            .into());
        }

        let mut url = self.base_url.clone();
        // Endpoints are validated http(s) URLs, which always accept segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        Ok(url)
    }

    fn stored_credential(&self) -> Option<Credential> {
        match storage::load_credential(self.storage.as_ref()) {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("Sending request without credential, storage unreadable: {e}");
                None
            }
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        credential: Option<Credential>,
    ) -> Result<String> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut request = request.header(REQUEST_ID_HEADER, &request_id);
        if let Some(credential) = &credential {
            request = request.header(reqwest::header::AUTHORIZATION, credential.bearer_header());
        }

        let request = request.build().map_err(|e| ApiError::InvalidUrl {
            url: e.url().map(Url::to_string).unwrap_or_default(),
            reason: e.to_string(),
        })?;
        let method = request.method().clone();
        let url = request.url().to_string();
        tracing::debug!(
            service = self.service,
            %method,
            %url,
            %request_id,
            authenticated = credential.is_some(),
            "Sending request"
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::Network {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        self.read_body(response, &url).await
    }

    async fn read_body(&self, response: Response, url: &str) -> Result<String> {
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let message = extract_message(&body, status.canonical_reason(), status.as_u16());
        tracing::debug!(
            service = self.service,
            status = status.as_u16(),
            %message,
            "Request rejected"
        );
        Err(ApiError::Status {
            service: self.service,
            status: status.as_u16(),
            message,
        }
        .into())
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            ApiError::Decode {
                service: self.service,
                reason: e.to_string(),
            }
            .into()
        })
    }
}
