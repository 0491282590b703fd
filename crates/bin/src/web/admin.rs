//! Administrator screens: pending work and application review.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use pragyan::{
    Identity,
    api::{ApplicationReview, ReviewDecision},
    routing::Route,
    validation,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use super::{AppState, action, finish, or_empty, screen};
use crate::templates::{self, PendingCounts, money};

const PENDING: &str = "PENDING";
const ALL: &str = "ALL";

/// Handler for GET /admin/dashboard
pub(crate) async fn dashboard(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::AdminDashboard) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let bank = &state.bank;
    let counts = PendingCounts {
        accounts: or_empty(
            "pending account applications",
            bank.accounts.applications_by_status(PENDING).await,
        )
        .len(),
        credit_cards: or_empty(
            "pending credit card applications",
            bank.credit_cards.applications_by_status(PENDING).await,
        )
        .len(),
        loans: or_empty(
            "pending loan applications",
            bank.loans.applications_by_status(PENDING).await,
        )
        .len(),
    };

    Html(templates::admin_dashboard_page(
        &viewer.frame(Route::AdminDashboard),
        &counts,
    ))
    .into_response()
}

/// Handler for GET /admin/accounts
pub(crate) async fn accounts(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::AdminAccounts) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let applications = or_empty(
        "account applications",
        state.bank.accounts.applications_by_status(ALL).await,
    );

    Html(templates::admin_accounts_page(
        &viewer.frame(Route::AdminAccounts),
        &applications,
    ))
    .into_response()
}

/// Handler for GET /admin/credit-cards
pub(crate) async fn credit_cards(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::AdminCreditCards) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let applications = or_empty(
        "credit card applications",
        state.bank.credit_cards.reviewable_applications().await,
    );

    Html(templates::admin_credit_cards_page(
        &viewer.frame(Route::AdminCreditCards),
        &applications,
    ))
    .into_response()
}

/// Handler for GET /admin/loans
pub(crate) async fn loans(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::AdminLoans) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let applications = or_empty(
        "loan applications",
        state.bank.loans.applications_by_status(ALL).await,
    );

    Html(templates::admin_loans_page(
        &viewer.frame(Route::AdminLoans),
        &applications,
    ))
    .into_response()
}

/// Review form data, shared by the three review screens
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct ReviewForm {
    application_number: String,
    status: String,
    rejection_reason: String,
    approved_credit_limit: String,
    approved_amount: String,
    approved_interest_rate: String,
}

impl ReviewForm {
    /// The review body. Approval terms are only sent with an approval.
    fn review(&self, reviewer: &Identity) -> pragyan::Result<ApplicationReview> {
        let number = validation::require("application", &self.application_number)?;
        let status: ReviewDecision = validation::require("status", &self.status)?.parse()?;
        let mut review = ApplicationReview::new(number, status, reviewer.username.as_str())
            .with_rejection_reason(validation::optional(Some(self.rejection_reason.as_str())));

        if status == ReviewDecision::Approved {
            review.approved_credit_limit = validation::parse_optional_amount(
                "approved credit limit",
                Some(self.approved_credit_limit.as_str()),
            )?;
            review.approved_amount = validation::parse_optional_amount(
                "approved amount",
                Some(self.approved_amount.as_str()),
            )?;
            review.approved_interest_rate = validation::parse_optional_amount(
                "interest rate",
                Some(self.approved_interest_rate.as_str()),
            )?;
        }
        Ok(review)
    }
}

/// Application follow-up form data (create account, issue card, disburse)
#[derive(Deserialize)]
pub(crate) struct ApplicationForm {
    #[serde(default)]
    application_number: String,
}

/// Handler for POST /admin/accounts/review
pub(crate) async fn review_account(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ReviewForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::AdminAccounts) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match form.review(&identity) {
        Ok(review) => state.bank.accounts.review_application(&review).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::AdminAccounts.path(), result, |app| {
        format!("Application {} marked {}.", app.application_number, app.status())
    })
}

/// Handler for POST /admin/accounts/create
pub(crate) async fn create_account(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ApplicationForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::AdminAccounts) {
        return response;
    }
    let result = match validation::require("application", &form.application_number) {
        Ok(number) => state.bank.accounts.create_account(number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::AdminAccounts.path(), result, |account| {
        format!("Account {} created.", account.account_number)
    })
}

/// Handler for POST /admin/credit-cards/review
pub(crate) async fn review_credit_card(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ReviewForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::AdminCreditCards) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match form.review(&identity) {
        Ok(review) => state.bank.credit_cards.review_application(&review).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::AdminCreditCards.path(), result, |app| {
        format!("Application {} marked {}.", app.application_number, app.status())
    })
}

/// Handler for POST /admin/credit-cards/issue
pub(crate) async fn issue_card(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ApplicationForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::AdminCreditCards) {
        return response;
    }
    let result = match validation::require("application", &form.application_number) {
        Ok(number) => state.bank.credit_cards.issue_card(number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::AdminCreditCards.path(), result, |card| {
        format!(
            "Card {} issued with a {} limit.",
            card.masked_number(),
            money(card.credit_limit)
        )
    })
}

/// Handler for POST /admin/loans/review
pub(crate) async fn review_loan(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ReviewForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::AdminLoans) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match form.review(&identity) {
        Ok(review) => state.bank.loans.review_application(&review).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::AdminLoans.path(), result, |app| {
        format!("Application {} marked {}.", app.application_number, app.status())
    })
}

/// Handler for POST /admin/loans/disburse
pub(crate) async fn disburse_loan(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ApplicationForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::AdminLoans) {
        return response;
    }
    let result = match validation::require("application", &form.application_number) {
        Ok(number) => state.bank.loans.disburse(number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::AdminLoans.path(), result, |loan| {
        format!(
            "Loan {} disbursed ({}).",
            loan.loan_number,
            money(loan.loan_amount)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviewer() -> Identity {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "root",
            "roles": ["ROLE_ADMIN"],
        }))
        .unwrap()
    }

    #[test]
    fn approval_carries_terms() {
        let form = ReviewForm {
            application_number: "LAPP1".into(),
            status: "APPROVED".into(),
            approved_amount: "20000".into(),
            approved_interest_rate: "7.5".into(),
            rejection_reason: "ignored".into(),
            ..Default::default()
        };
        let review = form.review(&reviewer()).unwrap();
        assert_eq!(review.status, ReviewDecision::Approved);
        assert_eq!(review.approved_amount, Some(20000.0));
        assert_eq!(review.approved_interest_rate, Some(7.5));
        assert_eq!(review.rejection_reason, None);
        assert_eq!(review.reviewed_by, "root");
    }

    #[test]
    fn rejection_drops_terms() {
        let form = ReviewForm {
            application_number: "APP1".into(),
            status: "REJECTED".into(),
            approved_credit_limit: "5000".into(),
            rejection_reason: "Insufficient income".into(),
            ..Default::default()
        };
        let review = form.review(&reviewer()).unwrap();
        assert_eq!(review.approved_credit_limit, None);
        assert_eq!(review.rejection_reason.as_deref(), Some("Insufficient income"));
    }

    #[test]
    fn unknown_status_is_refused() {
        let form = ReviewForm {
            application_number: "APP1".into(),
            status: "MAYBE".into(),
            ..Default::default()
        };
        assert!(form.review(&reviewer()).unwrap_err().is_validation_error());
    }
}
