//! Credit card and gift card screens.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use pragyan::{
    api::{
        accounts::EMPLOYMENT_STATUSES,
        credit_cards::{CARD_TYPES, CardTransactionRequest, CreditCardApplicationRequest},
        gift_cards::{GiftCardRequest, RedeemRequest},
    },
    routing::Route,
    validation,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use super::{AppState, action, finish, optional_choice, or_empty, screen};
use crate::templates::{self, money};

/// Handler for GET /credit-cards
pub(crate) async fn credit_cards(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::CreditCards) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let user_id = viewer.identity.id;
    let cards = or_empty(
        "credit cards",
        state.bank.credit_cards.cards_for_user(user_id).await,
    );
    let applications = or_empty(
        "credit card applications",
        state.bank.credit_cards.applications_for_user(user_id).await,
    );

    Html(templates::credit_cards_page(
        &viewer.frame(Route::CreditCards),
        &cards,
        &applications,
    ))
    .into_response()
}

/// Credit card application form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct CardApplicationForm {
    card_holder_name: String,
    card_type: String,
    annual_income: String,
    email: String,
    phone_number: String,
    date_of_birth: String,
    address_line1: String,
    city: String,
    state: String,
    zip_code: String,
    employment_status: String,
    employer_name: String,
}

impl CardApplicationForm {
    fn request(&self, user_id: i64) -> pragyan::Result<CreditCardApplicationRequest> {
        let optional = |value: &String| validation::optional(Some(value.as_str()));
        Ok(CreditCardApplicationRequest {
            user_id,
            card_holder_name: validation::require("card holder name", &self.card_holder_name)?
                .to_string(),
            card_type: validation::choice("card type", &self.card_type, &CARD_TYPES)?.to_string(),
            annual_income: validation::parse_amount("annual income", &self.annual_income)?,
            email: optional(&self.email),
            phone_number: optional(&self.phone_number),
            date_of_birth: optional(&self.date_of_birth),
            address_line1: optional(&self.address_line1),
            city: optional(&self.city),
            state: optional(&self.state),
            zip_code: optional(&self.zip_code),
            employment_status: optional_choice(
                "employment status",
                &self.employment_status,
                &EMPLOYMENT_STATUSES,
            )?,
            employer_name: optional(&self.employer_name),
        })
    }
}

/// Handler for POST /credit-cards/apply
pub(crate) async fn apply_for_card(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CardApplicationForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::CreditCards) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match form.request(identity.id) {
        Ok(request) => state.bank.credit_cards.apply(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::CreditCards.path(), result, |application| {
        format!(
            "Application {} submitted for review.",
            application.application_number
        )
    })
}

/// Purchase and payment form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct CardTransactionForm {
    card_number: String,
    amount: String,
    merchant_name: String,
    description: String,
}

impl CardTransactionForm {
    fn request(&self) -> pragyan::Result<CardTransactionRequest> {
        Ok(CardTransactionRequest {
            card_number: validation::require("card", &self.card_number)?.to_string(),
            amount: validation::parse_amount("amount", &self.amount)?,
            merchant_name: validation::optional(Some(self.merchant_name.as_str())),
            description: validation::optional(Some(self.description.as_str())),
        })
    }
}

/// Handler for POST /credit-cards/purchase
pub(crate) async fn purchase(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CardTransactionForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::CreditCards) {
        return response;
    }
    let result = match form.request() {
        Ok(request) => state.bank.credit_cards.purchase(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::CreditCards.path(), result, |txn| {
        format!("Purchase of {} recorded.", money(txn.amount))
    })
}

/// Handler for POST /credit-cards/payment
pub(crate) async fn payment(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CardTransactionForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::CreditCards) {
        return response;
    }
    let result = match form.request() {
        Ok(request) => state.bank.credit_cards.payment(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::CreditCards.path(), result, |txn| {
        format!("Payment of {} received.", money(txn.amount))
    })
}

/// Block and unblock form data
#[derive(Deserialize)]
pub(crate) struct CardForm {
    #[serde(default)]
    card_number: String,
}

/// Handler for POST /credit-cards/block
pub(crate) async fn block(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CardForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::CreditCards) {
        return response;
    }
    let result = match validation::require("card", &form.card_number) {
        Ok(card_number) => state.bank.credit_cards.block(card_number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::CreditCards.path(), result, |card| {
        format!("Card {} blocked.", card.masked_number())
    })
}

/// Handler for POST /credit-cards/unblock
pub(crate) async fn unblock(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CardForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::CreditCards) {
        return response;
    }
    let result = match validation::require("card", &form.card_number) {
        Ok(card_number) => state.bank.credit_cards.unblock(card_number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::CreditCards.path(), result, |card| {
        format!("Card {} unblocked.", card.masked_number())
    })
}

/// Handler for GET /gift-cards
pub(crate) async fn gift_cards(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::GiftCards) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let user_id = viewer.identity.id;
    let cards = or_empty(
        "gift cards",
        state.bank.gift_cards.cards_for_owner(user_id).await,
    );
    let accounts = or_empty("accounts", state.bank.accounts.accounts_for_user(user_id).await);

    Html(templates::gift_cards_page(
        &viewer.frame(Route::GiftCards),
        &cards,
        &accounts,
    ))
    .into_response()
}

/// Gift card purchase form data
#[derive(Deserialize)]
pub(crate) struct BuyGiftCardForm {
    #[serde(default)]
    amount: String,
}

/// Handler for POST /gift-cards/buy
pub(crate) async fn buy_gift_card(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<BuyGiftCardForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::GiftCards) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match validation::parse_amount("amount", &form.amount) {
        Ok(amount) => {
            let request = GiftCardRequest::new(identity.id, amount);
            state.bank.gift_cards.create(&request).await
        }
        Err(e) => Err(e),
    };

    finish(&cookies, Route::GiftCards.path(), result, |card| {
        format!(
            "Gift card {} for {} created.",
            card.card_code,
            money(card.initial_balance)
        )
    })
}

/// Gift card redemption form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct RedeemForm {
    card_code: String,
    account: String,
}

/// Handler for POST /gift-cards/redeem
pub(crate) async fn redeem_gift_card(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RedeemForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::GiftCards) {
        return response;
    }
    let request = validation::require("gift card code", &form.card_code).and_then(|code| {
        let account = validation::require("account", &form.account)?;
        Ok(RedeemRequest::into_account(code, account))
    });
    let result = match request {
        Ok(request) => state.bank.gift_cards.redeem(&request).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::GiftCards.path(), result, |txn| {
        format!("Redeemed {}.", money(txn.amount))
    })
}
