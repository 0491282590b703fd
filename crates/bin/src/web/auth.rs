//! Login, signup and logout screens.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use pragyan::{
    auth::{SignupForm, SignupOutcome},
    routing::{Route, default_route},
};
use serde::Deserialize;
use tower_cookies::Cookies;

use super::{AppState, Flash, public, set_flash};
use crate::templates;

/// Login form data
#[derive(Deserialize)]
pub(crate) struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Handler for GET /login
pub(crate) async fn login_page(State(state): State<AppState>, cookies: Cookies) -> Response {
    match public(&state, &cookies, Route::Login) {
        Ok(flash) => Html(templates::login_page(flash.as_ref(), "")).into_response(),
        Err(response) => response,
    }
}

/// Handler for POST /login
pub(crate) async fn login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(response) = public(&state, &cookies, Route::Login) {
        return response;
    }

    match state.auth.login(&form.username, &form.password).await {
        Ok(identity) => {
            tracing::info!("Signed in as {}", identity.username);
            Redirect::to(default_route(state.access()).path()).into_response()
        }
        Err(e) => {
            let flash = Flash::error(e.user_message());
            Html(templates::login_page(Some(&flash), &form.username)).into_response()
        }
    }
}

/// Handler for GET /signup
pub(crate) async fn signup_page(State(state): State<AppState>, cookies: Cookies) -> Response {
    match public(&state, &cookies, Route::Signup) {
        Ok(flash) => {
            Html(templates::signup_page(flash.as_ref(), &SignupForm::default())).into_response()
        }
        Err(response) => response,
    }
}

/// Handler for POST /signup
pub(crate) async fn signup_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SignupForm>,
) -> Response {
    if let Err(response) = public(&state, &cookies, Route::Signup) {
        return response;
    }

    match state.auth.signup(&form).await {
        Ok(SignupOutcome::SignedIn(identity)) => {
            tracing::info!("Signed up and signed in as {}", identity.username);
            Redirect::to(default_route(state.access()).path()).into_response()
        }
        Ok(SignupOutcome::Registered { message }) => {
            set_flash(&cookies, Flash::success(message));
            Redirect::to(Route::Login.path()).into_response()
        }
        Err(e) => {
            let flash = Flash::error(e.user_message());
            Html(templates::signup_page(Some(&flash), &form)).into_response()
        }
    }
}

/// Handler for POST /logout
pub(crate) async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    state.auth.logout();
    set_flash(&cookies, Flash::success("You have been signed out."));
    Redirect::to(Route::Login.path())
}
