//! Loan service.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ApplicationReview, ServiceClient};
use crate::Result;

pub const LOAN_TYPES: [&str; 4] = ["PERSONAL_LOAN", "HOME_LOAN", "AUTO_LOAN", "EDUCATION_LOAN"];
pub const TENURE_MONTHS: [u32; 9] = [6, 12, 24, 36, 60, 120, 180, 240, 360];
pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "EMI Payment";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default)]
    pub id: Option<i64>,
    pub loan_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub loan_amount: f64,
    #[serde(default)]
    pub interest_rate: Option<f64>,
    #[serde(default)]
    pub tenure_months: Option<u32>,
    #[serde(default)]
    pub monthly_emi: Option<f64>,
    #[serde(default)]
    pub outstanding_amount: f64,
    #[serde(default)]
    pub loan_status: Option<String>,
    #[serde(default)]
    pub disbursement_date: Option<NaiveDate>,
    #[serde(default)]
    pub purpose: Option<String>,
}

impl Loan {
    /// Still accepting payments.
    pub fn is_payable(&self) -> bool {
        matches!(self.loan_status.as_deref(), Some("ACTIVE" | "DISBURSED"))
            && self.outstanding_amount > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[serde(default)]
    pub id: Option<i64>,
    pub application_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub loan_amount: f64,
    #[serde(default)]
    pub tenure_months: Option<u32>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<i32>,
    #[serde(default)]
    pub application_status: Option<String>,
    #[serde(default)]
    pub approved_amount: Option<f64>,
    #[serde(default)]
    pub approved_interest_rate: Option<f64>,
    #[serde(default)]
    pub monthly_emi: Option<f64>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl LoanApplication {
    pub fn status(&self) -> &str {
        self.application_status.as_deref().unwrap_or("PENDING")
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationRequest {
    pub user_id: i64,
    pub applicant_name: String,
    pub loan_type: String,
    pub loan_amount: f64,
    pub tenure_months: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPaymentRequest {
    pub loan_number: String,
    pub amount: f64,
    pub description: String,
}

impl LoanPaymentRequest {
    pub fn new(loan_number: impl Into<String>, amount: f64, description: Option<String>) -> Self {
        Self {
            loan_number: loan_number.into(),
            amount,
            description: description.unwrap_or_else(|| DEFAULT_PAYMENT_DESCRIPTION.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub loan_number: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub principal_amount: Option<f64>,
    #[serde(default)]
    pub interest_amount: Option<f64>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_date: Option<NaiveDateTime>,
}

/// Client of the loan service.
#[derive(Clone, Debug)]
pub struct LoansApi {
    client: ServiceClient,
}

impl LoansApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn apply(&self, request: &LoanApplicationRequest) -> Result<LoanApplication> {
        self.client.post(&["api", "loans", "applications"], request).await
    }

    pub async fn applications_for_user(&self, user_id: i64) -> Result<Vec<LoanApplication>> {
        self.client
            .get(&["api", "loans", "applications", "user", &user_id.to_string()])
            .await
    }

    /// Applications in `status`; the service also accepts `ALL`.
    pub async fn applications_by_status(&self, status: &str) -> Result<Vec<LoanApplication>> {
        self.client
            .get(&["api", "loans", "applications", "status", status])
            .await
    }

    pub async fn review_application(&self, review: &ApplicationReview) -> Result<LoanApplication> {
        self.client
            .put(&["api", "loans", "applications", "review"], review)
            .await
    }

    pub async fn disburse(&self, application_number: &str) -> Result<Loan> {
        self.client
            .post_empty(&["api", "loans", "applications", application_number, "disburse"])
            .await
    }

    pub async fn pay(&self, request: &LoanPaymentRequest) -> Result<LoanPayment> {
        self.client.post(&["api", "loans", "payment"], request).await
    }

    pub async fn loans_for_user(&self, user_id: i64) -> Result<Vec<Loan>> {
        self.client.get(&["api", "loans", "user", &user_id.to_string()]).await
    }
}
