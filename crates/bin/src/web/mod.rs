//! The local web front: one axum router over the session core.
//!
//! Every page handler first asks the route gate what to do with the request.
//! Only a `Render` decision reaches the screen; redirects and the loading
//! placeholder are answered here.

mod admin;
mod auth;
mod banking;
mod cards;
mod loans;
mod lockers;

use std::{str::FromStr, sync::Arc};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use pragyan::{
    AuthFlow, BankClient, Bootstrapper, ClientConfig, Identity, SessionStatus, SessionStore,
    routing::{AccessState, Chrome, Decision, Route, resolve},
    session::IdentityProvider,
    storage::{self, CredentialStorage},
    validation,
};
use serde::Serialize;
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use url::form_urlencoded;

use crate::templates;

const NOTICE_COOKIE: &str = "pragyan_notice";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
    pub storage: Arc<dyn CredentialStorage>,
    pub bank: BankClient,
    pub auth: AuthFlow,
    pub bootstrapper: Arc<Bootstrapper>,
}

impl AppState {
    pub fn new(config: &ClientConfig, storage: Arc<dyn CredentialStorage>) -> pragyan::Result<Self> {
        let store = SessionStore::new();
        let bank = BankClient::new(config, Arc::clone(&storage))?;
        let provider: Arc<dyn IdentityProvider> = Arc::new(bank.identity.clone());
        let bootstrapper = Arc::new(Bootstrapper::new(
            store.clone(),
            Arc::clone(&storage),
            provider,
        ));
        let auth = AuthFlow::new(store.clone(), Arc::clone(&storage), bank.identity.clone());

        Ok(Self {
            store,
            storage,
            bank,
            auth,
            bootstrapper,
        })
    }

    /// Reconcile the persisted credential with the session in the background.
    pub fn spawn_bootstrap(&self) -> tokio::task::JoinHandle<()> {
        let bootstrapper = Arc::clone(&self.bootstrapper);
        tokio::spawn(async move {
            let outcome = bootstrapper.run().await;
            tracing::info!("Session bootstrap finished: {outcome:?}");
        })
    }

    pub fn access(&self) -> AccessState {
        let persisted = storage::has_persisted_credential(self.storage.as_ref());
        let access = AccessState::from_session(&self.store.snapshot(), persisted);
        // The resume task may not have marked the session as loading yet.
        if access == AccessState::Anonymous && persisted && self.bootstrapper.outcome().is_none() {
            return AccessState::Authenticating;
        }
        access
    }
}

/// Build the router for every screen, action and the health probe.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/signup", get(auth::signup_page).post(auth::signup_submit))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(banking::dashboard))
        .route("/accounts", get(banking::accounts))
        .route("/accounts/apply", post(banking::apply_for_account))
        .route("/transactions", get(banking::transactions))
        .route("/transactions/deposit", post(banking::deposit))
        .route("/transactions/withdraw", post(banking::withdraw))
        .route("/transactions/transfer", post(banking::transfer))
        .route("/credit-cards", get(cards::credit_cards))
        .route("/credit-cards/apply", post(cards::apply_for_card))
        .route("/credit-cards/purchase", post(cards::purchase))
        .route("/credit-cards/payment", post(cards::payment))
        .route("/credit-cards/block", post(cards::block))
        .route("/credit-cards/unblock", post(cards::unblock))
        .route("/gift-cards", get(cards::gift_cards))
        .route("/gift-cards/buy", post(cards::buy_gift_card))
        .route("/gift-cards/redeem", post(cards::redeem_gift_card))
        .route("/loans", get(loans::loans))
        .route("/loans/apply", post(loans::apply_for_loan))
        .route("/loans/pay", post(loans::pay))
        .route("/lockers", get(lockers::lockers))
        .route("/lockers/rent", post(lockers::rent))
        .route("/lockers/renew", post(lockers::renew))
        .route("/lockers/release", post(lockers::release))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/accounts", get(admin::accounts))
        .route("/admin/accounts/review", post(admin::review_account))
        .route("/admin/accounts/create", post(admin::create_account))
        .route("/admin/credit-cards", get(admin::credit_cards))
        .route("/admin/credit-cards/review", post(admin::review_credit_card))
        .route("/admin/credit-cards/issue", post(admin::issue_card))
        .route("/admin/loans", get(admin::loans))
        .route("/admin/loans/review", post(admin::review_loan))
        .route("/admin/loans/disburse", post(admin::disburse_loan))
        .fallback(handle_fallback)
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// A message carried across one redirect in the `pragyan_notice` cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        let tag = match self.kind {
            FlashKind::Success => "ok",
            FlashKind::Error => "err",
        };
        form_urlencoded::byte_serialize(format!("{tag}:{}", self.message).as_bytes()).collect()
    }

    fn decode(raw: &str) -> Option<Self> {
        let (decoded, _) = form_urlencoded::parse(raw.as_bytes()).next()?;
        let (tag, message) = decoded.split_once(':')?;
        match tag {
            "ok" => Some(Flash::success(message)),
            "err" => Some(Flash::error(message)),
            _ => None,
        }
    }
}

pub(crate) fn set_flash(cookies: &Cookies, flash: Flash) {
    let cookie = Cookie::build((NOTICE_COOKIE, flash.encode()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Read and clear the pending notice.
pub(crate) fn take_flash(cookies: &Cookies) -> Option<Flash> {
    let cookie = cookies.get(NOTICE_COOKIE)?;
    cookies.remove(Cookie::build(NOTICE_COOKIE).path("/").build());
    Flash::decode(cookie.value())
}

// ============================================================================
// Route gate
// ============================================================================

/// The signed-in user about to see an authenticated screen.
pub(crate) struct Viewer {
    pub identity: Identity,
    pub chrome: Chrome,
    pub flash: Option<Flash>,
}

impl Viewer {
    pub fn frame(&self, route: Route) -> templates::Frame<'_> {
        templates::Frame {
            identity: &self.identity,
            chrome: self.chrome,
            route,
            flash: self.flash.as_ref(),
        }
    }
}

/// Answer a navigation that does not render its own screen.
fn respond(cookies: &Cookies, decision: Decision) -> Response {
    match decision {
        Decision::Loading => Html(templates::loading_page()).into_response(),
        Decision::Redirect { to, notice } => {
            if let Some(notice) = notice {
                set_flash(cookies, Flash::error(notice.message()));
            }
            Redirect::to(to.path()).into_response()
        }
        Decision::Render { route, .. } => Redirect::to(route.path()).into_response(),
    }
}

/// Gate an authenticated screen.
pub(crate) fn screen(state: &AppState, cookies: &Cookies, route: Route) -> Result<Viewer, Response> {
    match resolve(route, state.access()) {
        Decision::Render {
            chrome: Some(chrome),
            ..
        } => match state.store.identity() {
            Some(identity) => Ok(Viewer {
                identity,
                chrome,
                flash: take_flash(cookies),
            }),
            None => Err(Redirect::to(Route::Login.path()).into_response()),
        },
        decision => Err(respond(cookies, decision)),
    }
}

/// Gate a form submission belonging to `route`'s screen.
///
/// While a resume is outstanding the browser is sent back to the screen,
/// which shows the loading placeholder.
pub(crate) fn action(state: &AppState, cookies: &Cookies, route: Route) -> Result<Identity, Response> {
    match resolve(route, state.access()) {
        Decision::Render { chrome: Some(_), .. } => state
            .store
            .identity()
            .ok_or_else(|| Redirect::to(Route::Login.path()).into_response()),
        Decision::Loading => Err(Redirect::to(route.path()).into_response()),
        decision => Err(respond(cookies, decision)),
    }
}

/// Gate a public screen, returning the pending notice.
pub(crate) fn public(state: &AppState, cookies: &Cookies, route: Route) -> Result<Option<Flash>, Response> {
    match resolve(route, state.access()) {
        Decision::Render { chrome: None, .. } => Ok(take_flash(cookies)),
        decision => Err(respond(cookies, decision)),
    }
}

/// Result of a screen fetch, or an empty value after logging the failure.
pub(crate) fn or_empty<T: Default>(what: &str, result: pragyan::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load {what}: {e}");
        T::default()
    })
}

/// A blank optional field, or one of `choices`.
pub(crate) fn optional_choice(
    field: &'static str,
    value: &str,
    choices: &[&str],
) -> pragyan::Result<Option<String>> {
    match validation::optional(Some(value)) {
        Some(value) => Ok(Some(validation::choice(field, &value, choices)?.to_string())),
        None => Ok(None),
    }
}

/// Redirect back after a submission, carrying its outcome as a notice.
pub(crate) fn finish<T>(
    cookies: &Cookies,
    back: &str,
    result: pragyan::Result<T>,
    success: impl FnOnce(T) -> String,
) -> Response {
    let flash = match result {
        Ok(value) => Flash::success(success(value)),
        Err(e) => {
            tracing::debug!("Submission to {back} failed: {e}");
            Flash::error(e.user_message())
        }
    };
    set_flash(cookies, flash);
    Redirect::to(back).into_response()
}

// ============================================================================
// Root, health and fallback
// ============================================================================

/// Handler for GET / - send the user to their landing screen
async fn handle_root(State(state): State<AppState>, cookies: Cookies) -> Response {
    respond(&cookies, resolve(Route::Root, state.access()))
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    session: SessionStatus,
}

/// Handler for GET /health
async fn handle_health(State(state): State<AppState>) -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy",
        session: state.store.status(),
    })
}

/// Unknown paths get a 404 page; known paths with a trailing slash are
/// redirected to their canonical form.
async fn handle_fallback(uri: Uri) -> Response {
    match Route::from_str(uri.path()) {
        Ok(route) => Redirect::permanent(route.path()).into_response(),
        Err(e) => {
            tracing::debug!("{e}");
            (
                StatusCode::NOT_FOUND,
                Html(templates::not_found_page(uri.path())),
            )
                .into_response()
        }
    }
}
