//! Locker screen.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use pragyan::{
    api::lockers::{LOCKER_SIZES, LockerRequest},
    routing::Route,
    validation,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use super::{AppState, action, finish, or_empty, screen};
use crate::templates;

/// Handler for GET /lockers
pub(crate) async fn lockers(State(state): State<AppState>, cookies: Cookies) -> Response {
    let viewer = match screen(&state, &cookies, Route::Lockers) {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };
    let mine = or_empty(
        "lockers",
        state.bank.lockers.lockers_for_user(viewer.identity.id).await,
    );
    let available = or_empty("available lockers", state.bank.lockers.available().await);

    Html(templates::lockers_page(
        &viewer.frame(Route::Lockers),
        &mine,
        &available,
    ))
    .into_response()
}

/// Locker rental form data
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct RentForm {
    locker_size: String,
    branch_location: String,
}

/// Handler for POST /lockers/rent
pub(crate) async fn rent(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RentForm>,
) -> Response {
    let identity = match action(&state, &cookies, Route::Lockers) {
        Ok(identity) => identity,
        Err(response) => return response,
    };
    let result = match validation::choice("locker size", &form.locker_size, &LOCKER_SIZES) {
        Ok(size) => {
            let branch = validation::optional(Some(form.branch_location.as_str()));
            let request = LockerRequest::new(identity.id, size, branch);
            state.bank.lockers.allocate(&request).await
        }
        Err(e) => Err(e),
    };

    finish(&cookies, Route::Lockers.path(), result, |locker| {
        format!("Locker {} allocated.", locker.locker_number)
    })
}

/// Renew and release form data
#[derive(Deserialize)]
pub(crate) struct LockerForm {
    #[serde(default)]
    locker_number: String,
}

/// Handler for POST /lockers/renew
pub(crate) async fn renew(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LockerForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::Lockers) {
        return response;
    }
    let result = match validation::require("locker", &form.locker_number) {
        Ok(number) => state.bank.lockers.renew(number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::Lockers.path(), result, |locker| {
        format!("Locker {} renewed.", locker.locker_number)
    })
}

/// Handler for POST /lockers/release
pub(crate) async fn release(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LockerForm>,
) -> Response {
    if let Err(response) = action(&state, &cookies, Route::Lockers) {
        return response;
    }
    let result = match validation::require("locker", &form.locker_number) {
        Ok(number) => state.bank.lockers.release(number).await,
        Err(e) => Err(e),
    };

    finish(&cookies, Route::Lockers.path(), result, |locker| {
        format!("Locker {} released.", locker.locker_number)
    })
}
