//! Credit card service.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ApplicationReview, ServiceClient};
use crate::Result;

pub const CARD_TYPES: [&str; 4] = ["VISA", "MASTERCARD", "AMERICAN_EXPRESS", "DISCOVER"];

/// Statuses the admin review screen lists together. The service has no `ALL`.
pub const REVIEWABLE_STATUSES: [&str; 3] = ["PENDING", "APPROVED", "REJECTED"];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    #[serde(default)]
    pub id: Option<i64>,
    pub card_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub card_holder_name: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub credit_limit: f64,
    #[serde(default)]
    pub available_credit: f64,
    #[serde(default)]
    pub outstanding_balance: f64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub billing_date: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_blocked: Option<bool>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl CreditCard {
    pub fn is_blocked(&self) -> bool {
        self.is_blocked.unwrap_or(false)
    }

    /// Last four digits, for display.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("**** **** **** {tail}")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardApplication {
    #[serde(default)]
    pub id: Option<i64>,
    pub application_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub card_holder_name: Option<String>,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub annual_income: Option<f64>,
    #[serde(default)]
    pub application_status: Option<String>,
    #[serde(default)]
    pub credit_score: Option<i32>,
    #[serde(default)]
    pub approved_credit_limit: Option<f64>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl CreditCardApplication {
    pub fn status(&self) -> &str {
        self.application_status.as_deref().unwrap_or("PENDING")
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardApplicationRequest {
    pub user_id: i64,
    pub card_holder_name: String,
    pub card_type: String,
    pub annual_income: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
}

/// Body of a purchase or a payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransactionRequest {
    pub card_number: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardTransaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Client of the credit card service.
#[derive(Clone, Debug)]
pub struct CreditCardsApi {
    client: ServiceClient,
}

impl CreditCardsApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn cards_for_user(&self, user_id: i64) -> Result<Vec<CreditCard>> {
        self.client
            .get(&["api", "credit-cards", "user", &user_id.to_string()])
            .await
    }

    pub async fn apply(
        &self,
        request: &CreditCardApplicationRequest,
    ) -> Result<CreditCardApplication> {
        self.client
            .post(&["api", "credit-cards", "applications"], request)
            .await
    }

    pub async fn applications_for_user(&self, user_id: i64) -> Result<Vec<CreditCardApplication>> {
        self.client
            .get(&["api", "credit-cards", "applications", "user", &user_id.to_string()])
            .await
    }

    pub async fn applications_by_status(&self, status: &str) -> Result<Vec<CreditCardApplication>> {
        self.client
            .get(&["api", "credit-cards", "applications", "status", status])
            .await
    }

    /// Every application in a reviewable status, merged in status order.
    pub async fn reviewable_applications(&self) -> Result<Vec<CreditCardApplication>> {
        let mut all = Vec::new();
        for status in REVIEWABLE_STATUSES {
            all.extend(self.applications_by_status(status).await?);
        }
        Ok(all)
    }

    pub async fn review_application(
        &self,
        review: &ApplicationReview,
    ) -> Result<CreditCardApplication> {
        self.client
            .put(&["api", "credit-cards", "applications", "review"], review)
            .await
    }

    pub async fn issue_card(&self, application_number: &str) -> Result<CreditCard> {
        self.client
            .post_empty(&["api", "credit-cards", "applications", application_number, "issue-card"])
            .await
    }

    pub async fn purchase(&self, request: &CardTransactionRequest) -> Result<CreditCardTransaction> {
        self.client.post(&["api", "credit-cards", "purchase"], request).await
    }

    pub async fn payment(&self, request: &CardTransactionRequest) -> Result<CreditCardTransaction> {
        self.client.post(&["api", "credit-cards", "payment"], request).await
    }

    pub async fn block(&self, card_number: &str) -> Result<CreditCard> {
        self.client
            .put_empty(&["api", "credit-cards", card_number, "block"])
            .await
    }

    pub async fn unblock(&self, card_number: &str) -> Result<CreditCard> {
        self.client
            .put_empty(&["api", "credit-cards", card_number, "unblock"])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_decodes_backend_payload() {
        let body = r#"{
            "id": 4,
            "cardNumber": "4111111111111111",
            "userId": 1,
            "cardHolderName": "Alice Doe",
            "cardType": "VISA",
            "creditLimit": 5000,
            "availableCredit": 4200.5,
            "outstandingBalance": 799.5,
            "cvv": "123",
            "expiryDate": "2029-05-31",
            "billingDate": 1,
            "isActive": true,
            "isBlocked": false
        }"#;
        let card: CreditCard = serde_json::from_str(body).unwrap();
        assert_eq!(card.credit_limit, 5000.0);
        assert_eq!(card.expiry_date, NaiveDate::from_ymd_opt(2029, 5, 31));
        assert!(!card.is_blocked());
        assert_eq!(card.masked_number(), "**** **** **** 1111");
    }

    #[test]
    fn short_card_number_masks_without_panicking() {
        let card: CreditCard = serde_json::from_str(r#"{"cardNumber": "12"}"#).unwrap();
        assert_eq!(card.masked_number(), "**** **** **** 12");
    }

    #[test]
    fn purchase_request_omits_missing_merchant() {
        let request = CardTransactionRequest {
            card_number: "4111".to_string(),
            amount: 20.0,
            merchant_name: None,
            description: Some("Coffee".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["cardNumber"], "4111");
        assert!(json.get("merchantName").is_none());
    }
}
