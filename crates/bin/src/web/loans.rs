//! Loan screen.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use pragyan::{
    api::loans::{LOAN_TYPES, LoanApplicationRequest, LoanPaymentRequest, TENURE_MONTHS},
    routing::Route,
    validation::{self, ValidationError},
};
use serde::Deserialize;
use tower_cookies::Cookies;

use super::{AppState, action, finish, or_empty, screen};
use crate::templates::{self, money};

/// Handler for GET /loans
pub(crate) async fn loans(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::Loans) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let user_id = viewer.identity.id;
    let loans = or_empty("loans", state.bank.loans.loans_for_user(user_id).await);
    let applications = or_empty(
        "loan applications",
        state.bank.loans.applications_for_user(user_id).await,
    );

    Html(templates::loans_page(
        &viewer.frame(Route::Loans),
        &loans,
        &applications,
    ))
    .into_response()
}

/// Loan application form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct LoanApplicationForm {
    applicant_name: String,
    loan_type: String,
    loan_amount: String,
    tenure_months: String,
    purpose: String,
    email: String,
    phone_number: String,
    employment_type: String,
    employer_name: String,
    monthly_income: String,
}

impl LoanApplicationForm {
    fn request(&self, user_id: i64) -> pragyan::Result<LoanApplicationRequest> {
        let tenure_months = validation::parse_count("tenure", &self.tenure_months)?;
        if !TENURE_MONTHS.contains(&tenure_months) {
            return Err(ValidationError::InvalidChoice {
                field: "tenure",
                value: tenure_months.to_string(),
            }
            .into());
        }
        let optional = |value: &String| validation::optional(Some(value.as_str()));

        Ok(LoanApplicationRequest {
            user_id,
            applicant_name: validation::require("applicant name", &self.applicant_name)?
                .to_string(),
            loan_type: validation::choice("loan type", &self.loan_type, &LOAN_TYPES)?.to_string(),
            loan_amount: validation::parse_amount("loan amount", &self.loan_amount)?,
            tenure_months,
            purpose: optional(&self.purpose),
            email: optional(&self.email),
            phone_number: optional(&self.phone_number),
            employment_type: optional(&self.employment_type),
            employer_name: optional(&self.employer_name),
            monthly_income: validation::parse_optional_amount(
                "monthly income",
                Some(self.monthly_income.as_str()),
            )?,
        })
    }
}

/// Handler for POST /loans/apply
pub(crate) async fn apply_for_loan(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoanApplicationForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::Loans) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match form.request(identity.id) {
        Ok(request) => state.bank.loans.apply(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::Loans.path(), result, |application| {
        format!(
            "Loan application {} submitted for review.",
            application.application_number
        )
    })
}

/// Loan payment form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct LoanPaymentForm {
    loan_number: String,
    amount: String,
    description: String,
}

/// Handler for POST /loans/pay
pub(crate) async fn pay(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoanPaymentForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::Loans) {
        return response;
    }
    let request = validation::require("loan", &form.loan_number).and_then(|loan_number| {
        let amount = validation::parse_amount("amount", &form.amount)?;
        let description = validation::optional(Some(form.description.as_str()));
        Ok(LoanPaymentRequest::new(loan_number, amount, description))
    });
    let result = match request {
        Ok(request) => state.bank.loans.pay(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::Loans.path(), result, |payment| {
        format!("Payment of {} received.", money(payment.amount))
    })
}
