//! Accounts and transactions service.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ApplicationReview, ServiceClient};
use crate::Result;

pub const ACCOUNT_TYPES: [&str; 4] = ["SAVINGS", "CHECKING", "FIXED_DEPOSIT", "CURRENT"];
pub const ACCOUNT_PURPOSES: [&str; 5] =
    ["PERSONAL", "BUSINESS", "INVESTMENT", "EDUCATION", "EMERGENCY"];
pub const EMPLOYMENT_STATUSES: [&str; 5] =
    ["EMPLOYED", "SELF_EMPLOYED", "STUDENT", "RETIRED", "UNEMPLOYED"];

pub const DEFAULT_DEPOSIT_DESCRIPTION: &str = "Deposit to account";
pub const DEFAULT_WITHDRAWAL_DESCRIPTION: &str = "Withdrawal from account";
pub const DEFAULT_TRANSFER_DESCRIPTION: &str = "Transfer between accounts";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub account_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Account {
    /// Accounts are active unless the service says otherwise.
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Sum of balances over active accounts.
pub fn total_balance(accounts: &[Account]) -> f64 {
    accounts
        .iter()
        .filter(|a| a.is_active())
        .map(|a| a.balance)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountApplication {
    #[serde(default)]
    pub id: Option<i64>,
    pub application_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub initial_deposit: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub application_status: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub account_created: Option<bool>,
    #[serde(default)]
    pub created_account_id: Option<i64>,
}

impl AccountApplication {
    pub fn status(&self) -> &str {
        self.application_status.as_deref().unwrap_or("PENDING")
    }

    /// Approved and still waiting for its account.
    pub fn awaits_account(&self) -> bool {
        self.status() == "APPROVED" && !self.account_created.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountApplicationRequest {
    pub user_id: i64,
    pub account_type: String,
    pub initial_deposit: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub from_account: Option<String>,
    #[serde(default)]
    pub to_account: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub transaction_status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Body shared by deposit, withdrawal and transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    pub description: String,
}

impl TransactionRequest {
    pub fn deposit(to_account: impl Into<String>, amount: f64, description: Option<String>) -> Self {
        Self {
            from_account: None,
            to_account: Some(to_account.into()),
            amount,
            transaction_type: Some("DEPOSIT".to_string()),
            description: description.unwrap_or_else(|| DEFAULT_DEPOSIT_DESCRIPTION.to_string()),
        }
    }

    pub fn withdrawal(
        from_account: impl Into<String>,
        amount: f64,
        description: Option<String>,
    ) -> Self {
        Self {
            from_account: Some(from_account.into()),
            to_account: None,
            amount,
            transaction_type: Some("WITHDRAWAL".to_string()),
            description: description
                .unwrap_or_else(|| DEFAULT_WITHDRAWAL_DESCRIPTION.to_string()),
        }
    }

    pub fn transfer(
        from_account: impl Into<String>,
        to_account: impl Into<String>,
        amount: f64,
        description: Option<String>,
    ) -> Self {
        Self {
            from_account: Some(from_account.into()),
            to_account: Some(to_account.into()),
            amount,
            transaction_type: None,
            description: description.unwrap_or_else(|| DEFAULT_TRANSFER_DESCRIPTION.to_string()),
        }
    }
}

/// Client of the accounts and transactions service.
#[derive(Clone, Debug)]
pub struct AccountsApi {
    client: ServiceClient,
}

impl AccountsApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn accounts_for_user(&self, user_id: i64) -> Result<Vec<Account>> {
        self.client
            .get(&["api", "accounts", "user", &user_id.to_string()])
            .await
    }

    pub async fn submit_application(
        &self,
        request: &AccountApplicationRequest,
    ) -> Result<AccountApplication> {
        self.client.post(&["api", "accounts", "applications"], request).await
    }

    pub async fn applications_for_user(&self, user_id: i64) -> Result<Vec<AccountApplication>> {
        self.client
            .get(&["api", "accounts", "applications", "user", &user_id.to_string()])
            .await
    }

    /// Applications in `status`; the service also accepts `ALL`.
    pub async fn applications_by_status(&self, status: &str) -> Result<Vec<AccountApplication>> {
        self.client
            .get(&["api", "accounts", "applications", "status", status])
            .await
    }

    pub async fn review_application(
        &self,
        review: &ApplicationReview,
    ) -> Result<AccountApplication> {
        self.client
            .put(&["api", "accounts", "applications", "review"], review)
            .await
    }

    pub async fn create_account(&self, application_number: &str) -> Result<Account> {
        self.client
            .post_empty(&["api", "accounts", "applications", application_number, "create-account"])
            .await
    }

    pub async fn deposit(&self, request: &TransactionRequest) -> Result<Transaction> {
        self.client.post(&["api", "transactions", "deposit"], request).await
    }

    pub async fn withdraw(&self, request: &TransactionRequest) -> Result<Transaction> {
        self.client.post(&["api", "transactions", "withdraw"], request).await
    }

    pub async fn transfer(&self, request: &TransactionRequest) -> Result<Transaction> {
        self.client.post(&["api", "transactions", "transfer"], request).await
    }

    pub async fn transactions_for_account(&self, account_number: &str) -> Result<Vec<Transaction>> {
        self.client
            .get(&["api", "transactions", "account", account_number])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_decodes_backend_payload() {
        let body = r#"{
            "id": 3,
            "accountNumber": "ACC1001",
            "userId": 1,
            "accountType": "SAVINGS",
            "balance": 1250.5,
            "currency": "USD",
            "isActive": true,
            "createdAt": "2024-03-01T09:15:30.123456"
        }"#;
        let account: Account = serde_json::from_str(body).unwrap();
        assert_eq!(account.account_number, "ACC1001");
        assert!(account.is_active());
        assert!(account.created_at.is_some());
    }

    #[test]
    fn total_balance_skips_inactive_accounts() {
        let accounts: Vec<Account> = serde_json::from_str(
            r#"[
                {"id": 1, "accountNumber": "A", "balance": 100.0},
                {"id": 2, "accountNumber": "B", "balance": 50.25, "isActive": true},
                {"id": 3, "accountNumber": "C", "balance": 999.0, "isActive": false}
            ]"#,
        )
        .unwrap();
        assert_eq!(total_balance(&accounts), 150.25);
    }

    #[test]
    fn transaction_requests_use_default_descriptions() {
        let deposit = serde_json::to_value(TransactionRequest::deposit("A", 10.0, None)).unwrap();
        assert_eq!(deposit["toAccount"], "A");
        assert_eq!(deposit["transactionType"], "DEPOSIT");
        assert_eq!(deposit["description"], DEFAULT_DEPOSIT_DESCRIPTION);
        assert!(deposit.get("fromAccount").is_none());

        let withdrawal = TransactionRequest::withdrawal("A", 5.0, Some("Rent".to_string()));
        assert_eq!(withdrawal.description, "Rent");

        let transfer = serde_json::to_value(TransactionRequest::transfer("A", "B", 1.0, None))
            .unwrap();
        assert_eq!(transfer["description"], DEFAULT_TRANSFER_DESCRIPTION);
        assert!(transfer.get("transactionType").is_none());
    }

    #[test]
    fn approved_application_awaits_account() {
        let app: AccountApplication = serde_json::from_str(
            r#"{"applicationNumber": "APP1", "applicationStatus": "APPROVED", "accountCreated": false}"#,
        )
        .unwrap();
        assert!(app.awaits_account());

        let pending: AccountApplication =
            serde_json::from_str(r#"{"applicationNumber": "APP2"}"#).unwrap();
        assert_eq!(pending.status(), "PENDING");
        assert!(!pending.awaits_account());
    }
}
