//! Gift card service.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::Result;

pub const DEFAULT_VALIDITY_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCard {
    #[serde(default)]
    pub id: Option<i64>,
    pub card_code: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub initial_balance: f64,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_redeemed: Option<bool>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl GiftCard {
    pub fn is_redeemed(&self) -> bool {
        self.is_redeemed.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardRequest {
    pub owner_id: i64,
    pub initial_balance: f64,
    pub validity_months: u32,
}

impl GiftCardRequest {
    pub fn new(owner_id: i64, initial_balance: f64) -> Self {
        Self {
            owner_id,
            initial_balance,
            validity_months: DEFAULT_VALIDITY_MONTHS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub card_code: String,
    pub account_number: String,
    pub description: String,
}

impl RedeemRequest {
    /// Redeem the whole card into `account_number`.
    pub fn into_account(card_code: impl Into<String>, account_number: impl Into<String>) -> Self {
        let account_number = account_number.into();
        Self {
            card_code: card_code.into(),
            description: format!("Deposited to account {account_number}"),
            account_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCardTransaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub card_code: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Client of the gift card service.
#[derive(Clone, Debug)]
pub struct GiftCardsApi {
    client: ServiceClient,
}

impl GiftCardsApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &GiftCardRequest) -> Result<GiftCard> {
        self.client.post(&["api", "gift-cards"], request).await
    }

    pub async fn redeem(&self, request: &RedeemRequest) -> Result<GiftCardTransaction> {
        self.client.post(&["api", "gift-cards", "redeem"], request).await
    }

    pub async fn cards_for_owner(&self, owner_id: i64) -> Result<Vec<GiftCard>> {
        self.client
            .get(&["api", "gift-cards", "owner", &owner_id.to_string()])
            .await
    }
}
