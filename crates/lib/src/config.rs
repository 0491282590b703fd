//! Client configuration: where the backend services live and where durable state is kept.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_AUTH_URL, DEFAULT_CREDIT_CARDS_URL, DEFAULT_GIFT_CARDS_URL, DEFAULT_LOANS_URL,
    DEFAULT_LOCKERS_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TRANSACTIONS_URL, STORAGE_FILE,
};

/// Errors raised while assembling a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {service} service URL '{url}': {reason}")]
    InvalidUrl {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("Unsupported URL scheme '{scheme}' for {service} service (expected http or https)")]
    UnsupportedScheme {
        service: &'static str,
        scheme: String,
    },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}

/// Base URLs of the six backend origins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub auth: Url,
    pub transactions: Url,
    pub credit_cards: Url,
    pub gift_cards: Url,
    pub loans: Url,
    pub lockers: Url,
}

impl ServiceEndpoints {
    /// Parse all six base URLs, in the order auth, transactions, credit cards,
    /// gift cards, loans, lockers.
    pub fn parse(
        auth: &str,
        transactions: &str,
        credit_cards: &str,
        gift_cards: &str,
        loans: &str,
        lockers: &str,
    ) -> crate::Result<Self> {
        Ok(Self {
            auth: parse_endpoint("auth", auth)?,
            transactions: parse_endpoint("transactions", transactions)?,
            credit_cards: parse_endpoint("credit-cards", credit_cards)?,
            gift_cards: parse_endpoint("gift-cards", gift_cards)?,
            loans: parse_endpoint("loans", loans)?,
            lockers: parse_endpoint("lockers", lockers)?,
        })
    }

    /// Service name and base URL pairs, for display.
    pub fn entries(&self) -> [(&'static str, &Url); 6] {
        [
            ("auth", &self.auth),
            ("transactions", &self.transactions),
            ("credit-cards", &self.credit_cards),
            ("gift-cards", &self.gift_cards),
            ("loans", &self.loans),
            ("lockers", &self.lockers),
        ]
    }
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self::parse(
            DEFAULT_AUTH_URL,
            DEFAULT_TRANSACTIONS_URL,
            DEFAULT_CREDIT_CARDS_URL,
            DEFAULT_GIFT_CARDS_URL,
            DEFAULT_LOANS_URL,
            DEFAULT_LOCKERS_URL,
        )
        .unwrap_or_else(|e| unreachable!("built-in endpoint defaults must parse: {e}"))
    }
}

fn parse_endpoint(service: &'static str, raw: &str) -> crate::Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        service,
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            service,
            scheme: other.to_string(),
        }
        .into()),
    }
}

/// Everything needed to construct the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: ServiceEndpoints,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// Directory holding durable client storage. `None` keeps state in memory only.
    pub data_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Path of the durable storage file, if a data directory is configured.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(STORAGE_FILE))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: ServiceEndpoints::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: None,
        }
    }
}
