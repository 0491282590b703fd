//! Typed clients for the banking backends.
//!
//! Each backend is a separate HTTP origin with JSON bodies. Every client
//! shares one `reqwest::Client` and reads the bearer credential from
//! [`CredentialStorage`] on each request, the way the browser client's request
//! interceptor did.

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Result;
use crate::config::ClientConfig;
use crate::storage::CredentialStorage;

pub mod accounts;
mod client;
pub mod credit_cards;
pub mod errors;
pub mod gift_cards;
pub mod identity;
pub mod lockers;
pub mod loans;

pub use accounts::AccountsApi;
pub use client::ServiceClient;
pub use credit_cards::CreditCardsApi;
pub use errors::ApiError;
pub use gift_cards::GiftCardsApi;
pub use identity::IdentityApi;
pub use lockers::LockersApi;
pub use loans::LoansApi;

/// An administrator's verdict on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewDecision {
    Approved,
    Rejected,
    UnderReview,
}

impl ReviewDecision {
    pub const ALL: [ReviewDecision; 3] = [
        ReviewDecision::Approved,
        ReviewDecision::Rejected,
        ReviewDecision::UnderReview,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewDecision::Approved => "APPROVED",
            ReviewDecision::Rejected => "REJECTED",
            ReviewDecision::UnderReview => "UNDER_REVIEW",
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewDecision {
    type Err = crate::validation::ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ReviewDecision::ALL
            .into_iter()
            .find(|decision| decision.as_str() == s)
            .ok_or_else(|| crate::validation::ValidationError::InvalidChoice {
                field: "status",
                value: s.to_string(),
            })
    }
}

/// Body of every `PUT .../applications/review`.
///
/// Account and credit card reviews use `approved_credit_limit`; loan reviews
/// use `approved_amount` and `approved_interest_rate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReview {
    pub application_number: String,
    pub status: ReviewDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub reviewed_by: String,
}

impl ApplicationReview {
    pub fn new(
        application_number: impl Into<String>,
        status: ReviewDecision,
        reviewed_by: impl Into<String>,
    ) -> Self {
        Self {
            application_number: application_number.into(),
            status,
            approved_credit_limit: None,
            approved_amount: None,
            approved_interest_rate: None,
            rejection_reason: None,
            reviewed_by: reviewed_by.into(),
        }
    }

    /// Attach a rejection reason. Ignored unless the decision is a rejection.
    pub fn with_rejection_reason(mut self, reason: Option<String>) -> Self {
        if self.status == ReviewDecision::Rejected {
            self.rejection_reason = reason;
        }
        self
    }
}

/// All backend clients of one running client.
#[derive(Clone, Debug)]
pub struct BankClient {
    pub identity: IdentityApi,
    pub accounts: AccountsApi,
    pub credit_cards: CreditCardsApi,
    pub gift_cards: GiftCardsApi,
    pub loans: LoansApi,
    pub lockers: LockersApi,
}

impl BankClient {
    pub fn new(config: &ClientConfig, storage: Arc<dyn CredentialStorage>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client {
                reason: e.to_string(),
            })?;
        let endpoints = &config.endpoints;
        let service = |name: &'static str, url: &Url| {
            ServiceClient::new(name, url, http.clone(), Arc::clone(&storage))
        };

        Ok(Self {
            identity: IdentityApi::new(service("auth", &endpoints.auth)),
            accounts: AccountsApi::new(service("transactions", &endpoints.transactions)),
            credit_cards: CreditCardsApi::new(service("credit-cards", &endpoints.credit_cards)),
            gift_cards: GiftCardsApi::new(service("gift-cards", &endpoints.gift_cards)),
            loans: LoansApi::new(service("loans", &endpoints.loans)),
            lockers: LockersApi::new(service("lockers", &endpoints.lockers)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_serializes_only_relevant_fields() {
        let review = ApplicationReview::new("APP1", ReviewDecision::Approved, "root")
            .with_rejection_reason(Some("ignored".to_string()));
        assert_eq!(
            serde_json::to_value(&review).unwrap(),
            serde_json::json!({
                "applicationNumber": "APP1",
                "status": "APPROVED",
                "reviewedBy": "root"
            })
        );

        let rejected = ApplicationReview::new("APP2", ReviewDecision::Rejected, "root")
            .with_rejection_reason(Some("Low income".to_string()));
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["status"], "REJECTED");
        assert_eq!(json["rejectionReason"], "Low income");
    }

    #[test]
    fn decision_parses_wire_names() {
        assert_eq!(
            "UNDER_REVIEW".parse::<ReviewDecision>().unwrap(),
            ReviewDecision::UnderReview
        );
        assert!("approved".parse::<ReviewDecision>().is_err());
    }

    #[test]
    fn bank_client_uses_configured_origins() {
        let storage: Arc<dyn CredentialStorage> = Arc::new(crate::storage::MemoryStorage::new());
        let bank = BankClient::new(&ClientConfig::default(), storage).unwrap();
        assert_eq!(bank.identity.client().base_url(), "http://localhost:8081");
        assert_eq!(bank.identity.client().service(), "auth");
    }
}
