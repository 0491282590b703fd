//! Dashboard, accounts and transactions screens.

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use pragyan::{
    api::accounts::{ACCOUNT_PURPOSES, ACCOUNT_TYPES, AccountApplicationRequest, EMPLOYMENT_STATUSES, TransactionRequest},
    routing::Route,
    validation,
};
use serde::Deserialize;
use tower_cookies::Cookies;
use url::form_urlencoded;

use super::{AppState, action, finish, optional_choice, or_empty, screen};
use crate::templates::{self, money};

const DEFAULT_CURRENCY: &str = "USD";

/// Handler for GET /dashboard
pub(crate) async fn dashboard(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::Dashboard) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let accounts = or_empty(
        "accounts",
        state.bank.accounts.accounts_for_user(viewer.identity.id).await,
    );

    Html(templates::dashboard_page(
        &viewer.frame(Route::Dashboard),
        &accounts,
    ))
    .into_response()
}

/// Handler for GET /accounts
pub(crate) async fn accounts(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::Accounts) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let user_id = viewer.identity.id;
    let accounts = or_empty("accounts", state.bank.accounts.accounts_for_user(user_id).await);
    let applications = or_empty(
        "account applications",
        state.bank.accounts.applications_for_user(user_id).await,
    );

    Html(templates::accounts_page(
        &viewer.frame(Route::Accounts),
        &accounts,
        &applications,
    ))
    .into_response()
}

/// Open-account application form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct AccountApplicationForm {
    account_type: String,
    initial_deposit: String,
    currency: String,
    purpose: String,
    employment_status: String,
    monthly_income: String,
    address: String,
    phone_number: String,
}

impl AccountApplicationForm {
    fn request(&self, user_id: i64) -> pragyan::Result<AccountApplicationRequest> {
        Ok(AccountApplicationRequest {
            user_id,
            account_type: validation::choice("account type", &self.account_type, &ACCOUNT_TYPES)?
                .to_string(),
            initial_deposit: validation::parse_optional_amount(
                "initial deposit",
                Some(self.initial_deposit.as_str()),
            )?
            .unwrap_or(0.0),
            currency: validation::optional(Some(self.currency.as_str()))
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            purpose: optional_choice("purpose", &self.purpose, &ACCOUNT_PURPOSES)?,
            employment_status: optional_choice(
                "employment status",
                &self.employment_status,
                &EMPLOYMENT_STATUSES,
            )?,
            monthly_income: validation::parse_optional_amount(
                "monthly income",
                Some(self.monthly_income.as_str()),
            )?,
            address: validation::optional(Some(self.address.as_str())),
            phone_number: validation::optional(Some(self.phone_number.as_str())),
        })
    }
}

/// Handler for POST /accounts/apply
pub(crate) async fn apply_for_account(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<AccountApplicationForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::Accounts) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match form.request(identity.id) {
        Ok(request) => state.bank.accounts.submit_application(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::Accounts.path(), result, |application| {
        format!(
            "Application {} submitted for review.",
            application.application_number
        )
    })
}

/// Selected account for the history view
#[derive(Deserialize)]
pub(crate) struct HistoryQuery {
    account: Option<String>,
}

/// Handler for GET /transactions?account=...
pub(crate) async fn transactions(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let viewer = match screen(&state, &cookies, Route::Transactions) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let accounts = or_empty(
        "accounts",
        state.bank.accounts.accounts_for_user(viewer.identity.id).await,
    );
    let selected = validation::optional(query.account.as_deref())
        .or_else(|| accounts.first().map(|a| a.account_number.clone()));
    let history = match &selected {
        Some(account) => or_empty(
            "transaction history",
            state.bank.accounts.transactions_for_account(account).await,
        ),
        None => Vec::new(),
    };

    Html(templates::transactions_page(
        &viewer.frame(Route::Transactions),
        &accounts,
        selected.as_deref(),
        &history,
    ))
    .into_response()
}

/// Deposit, withdrawal and transfer form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct TransactionForm {
    account: String,
    to_account: String,
    amount: String,
    description: String,
}

impl TransactionForm {
    fn amount(&self) -> pragyan::Result<f64> {
        validation::parse_amount("amount", &self.amount)
    }

    fn description(&self) -> Option<String> {
        validation::optional(Some(self.description.as_str()))
    }

    /// The history view of the account the form acted on.
    fn back(&self) -> String {
        let account = self.account.trim();
        if account.is_empty() {
            return Route::Transactions.path().to_string();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("account", account)
            .finish();
        format!("{}?{query}", Route::Transactions.path())
    }
}

/// Handler for POST /transactions/deposit
pub(crate) async fn deposit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::Transactions) {
        return response;
    }
    let request = validation::require("account", &form.account).and_then(|account| {
        Ok(TransactionRequest::deposit(account, form.amount()?, form.description()))
    });
    let result = match request {
        Ok(request) => state.bank.accounts.deposit(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, &form.back(), result, |txn| {
        format!("Deposited {}.", money(txn.amount))
    })
}

/// Handler for POST /transactions/withdraw
pub(crate) async fn withdraw(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::Transactions) {
        return response;
    }
    let request = validation::require("account", &form.account).and_then(|account| {
        Ok(TransactionRequest::withdrawal(account, form.amount()?, form.description()))
    });
    let result = match request {
        Ok(request) => state.bank.accounts.withdraw(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, &form.back(), result, |txn| {
        format!("Withdrew {}.", money(txn.amount))
    })
}

/// Handler for POST /transactions/transfer
pub(crate) async fn transfer(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::Transactions) {
        return response;
    }
    let request = validation::require("account", &form.account).and_then(|from| {
        let to = validation::require("destination account", &form.to_account)?;
        Ok(TransactionRequest::transfer(from, to, form.amount()?, form.description()))
    });
    let result = match request {
        Ok(request) => state.bank.accounts.transfer(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, &form.back(), result, |txn| {
        format!(
            "Transferred {} to {}.",
            money(txn.amount),
            txn.to_account.unwrap_or_default()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_defaults_currency_and_deposit() {
        let form = AccountApplicationForm {
            account_type: "SAVINGS".into(),
            ..Default::default()
        };
        let request = form.request(7).unwrap();
        assert_eq!(request.user_id, 7);
        assert_eq!(request.currency, "USD");
        assert_eq!(request.initial_deposit, 0.0);
        assert_eq!(request.purpose, None);
    }

    #[test]
    fn application_rejects_unknown_type() {
        let form = AccountApplicationForm {
            account_type: "OFFSHORE".into(),
            ..Default::default()
        };
        let err = form.request(7).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn back_keeps_the_selected_account() {
        let form = TransactionForm {
            account: "ACC 1".into(),
            ..Default::default()
        };
        assert_eq!(form.back(), "/transactions?account=ACC+1");
        assert_eq!(TransactionForm::default().back(), "/transactions");
    }
}
