use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use pragyan::{ServiceEndpoints, session::Identity};
use serde_json::{Value, json};

// Re-export tokio test macro for convenience
pub use tokio;

// Re-export TestContext for convenience
pub use crate::context::TestContext;

/// What the fake identity service answers for a known credential.
pub fn alice() -> Value {
    json!({"id": 1, "username": "alice", "roles": ["customer"]})
}

pub fn root() -> Value {
    json!({
        "id": 2,
        "username": "root",
        "firstName": "Ada",
        "lastName": "Admin",
        "email": "root@pragyan.test",
        "roles": [{"id": 1, "name": "ROLE_ADMIN", "description": "Administrator"}]
    })
}

/// Everything the fake backend observed.
#[derive(Debug, Default)]
pub struct Observed {
    pub me_calls: usize,
    pub authorizations: Vec<Option<String>>,
    pub request_ids: Vec<String>,
    pub signup_bodies: Vec<Value>,
    pub deposits: Vec<Value>,
    /// `METHOD /raw/path` of every locker action, as it arrived on the wire.
    pub requests: Vec<String>,
    /// Decoded `(locker number, action)` pairs.
    pub locker_actions: Vec<(String, String)>,
}

/// One in-process server standing in for all six banking services.
///
/// Known credentials: `tok-123` (alice), `tok-root` (root, administrator),
/// `tok-empty` (answers `/me` with an empty body). Anything else is refused.
#[derive(Clone, Default)]
pub struct FakeBank {
    observed: Arc<Mutex<Observed>>,
}

impl FakeBank {
    pub fn observed(&self) -> std::sync::MutexGuard<'_, Observed> {
        self.observed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, headers: &HeaderMap) {
        let mut observed = self.observed();
        observed.authorizations.push(
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        );
        if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            observed.request_ids.push(id.to_string());
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/signup", post(signup))
            .route("/api/auth/me", get(me))
            .route("/api/accounts/user/{id}", get(accounts))
            .route("/api/accounts/applications/status/{status}", get(applications))
            .route("/api/transactions/deposit", post(deposit))
            .route("/api/credit-cards/{number}/block", put(block_card))
            .route("/api/lockers/available", get(available_lockers))
            .route("/api/lockers/{number}/{action}", put(locker_action))
            .with_state(self.clone())
    }

    /// Serve on an ephemeral local port.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }
}

/// Every service pointed at the same fake.
pub fn endpoints_for(addr: SocketAddr) -> ServiceEndpoints {
    let base = format!("http://{addr}");
    ServiceEndpoints::parse(&base, &base, &base, &base, &base, &base).unwrap()
}

/// Endpoints where nothing listens.
pub fn unreachable_endpoints() -> ServiceEndpoints {
    let base = "http://127.0.0.1:9";
    ServiceEndpoints::parse(base, base, base, base, base, base).unwrap()
}

pub fn identity(value: Value) -> Identity {
    serde_json::from_value(value).unwrap()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Unauthorized", "status": 401})),
    )
        .into_response()
}

async fn login(State(bank): State<FakeBank>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    bank.record(&headers);
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if password != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid username or password"})),
        )
            .into_response();
    }
    let (id, roles) = match username {
        "root" => (2, json!(["ROLE_ADMIN"])),
        _ => (1, json!(["customer"])),
    };
    Json(json!({
        "token": format!("tok-{username}"),
        "type": "Bearer",
        "id": id,
        "username": username,
        "email": format!("{username}@pragyan.test"),
        "roles": roles,
    }))
    .into_response()
}

async fn signup(State(bank): State<FakeBank>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    bank.record(&headers);
    let taken = body["username"] == "taken";
    bank.observed().signup_bodies.push(body);
    if taken {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Error: Username is already taken!"})),
        )
            .into_response();
    }
    Json(json!({"message": "User registered successfully!"})).into_response()
}

async fn me(State(bank): State<FakeBank>, headers: HeaderMap) -> Response {
    bank.record(&headers);
    bank.observed().me_calls += 1;
    match bearer(&headers) {
        Some("tok-123") => Json(alice()).into_response(),
        Some("tok-root") => Json(root()).into_response(),
        Some("tok-empty") => StatusCode::OK.into_response(),
        _ => (StatusCode::BAD_REQUEST, "Invalid token").into_response(),
    }
}

async fn accounts(
    State(bank): State<FakeBank>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> Response {
    bank.record(&headers);
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    Json(json!([
        {
            "id": 10,
            "accountNumber": format!("ACC{user_id}001"),
            "userId": user_id,
            "accountType": "SAVINGS",
            "balance": 1500.75,
            "currency": "USD",
            "isActive": true,
            "createdAt": "2024-03-01T09:15:30"
        },
        {
            "id": 11,
            "accountNumber": format!("ACC{user_id}002"),
            "userId": user_id,
            "accountType": "CHECKING",
            "balance": 200.0,
            "currency": "USD",
            "isActive": false
        }
    ]))
    .into_response()
}

async fn applications(
    State(bank): State<FakeBank>,
    headers: HeaderMap,
    Path(status): Path<String>,
) -> Response {
    bank.record(&headers);
    if status != "ALL" {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Invalid status"})))
            .into_response();
    }
    Json(json!([
        {"applicationNumber": "APP-1", "applicationStatus": "PENDING", "accountType": "SAVINGS"},
        {"applicationNumber": "APP-2", "applicationStatus": "APPROVED", "accountCreated": false}
    ]))
    .into_response()
}

async fn deposit(State(bank): State<FakeBank>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    bank.record(&headers);
    if body["toAccount"] == "missing" {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Account not found"})))
            .into_response();
    }
    let response = json!({
        "id": 99,
        "transactionId": "TXN-99",
        "toAccount": body["toAccount"],
        "amount": body["amount"],
        "transactionType": "DEPOSIT",
        "transactionStatus": "COMPLETED",
        "description": body["description"],
    });
    bank.observed().deposits.push(body);
    Json(response).into_response()
}

async fn block_card(
    State(bank): State<FakeBank>,
    headers: HeaderMap,
    Path(number): Path<String>,
) -> Response {
    bank.record(&headers);
    Json(json!({
        "cardNumber": number,
        "creditLimit": 5000,
        "availableCredit": 5000,
        "isActive": true,
        "isBlocked": true
    }))
    .into_response()
}

async fn available_lockers(State(bank): State<FakeBank>, headers: HeaderMap) -> Response {
    bank.record(&headers);
    Json(json!([])).into_response()
}

async fn locker_action(
    State(bank): State<FakeBank>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((number, action)): Path<(String, String)>,
) -> Response {
    bank.record(&headers);
    let status = if action == "release" { "AVAILABLE" } else { "OCCUPIED" };
    {
        let mut observed = bank.observed();
        observed.requests.push(format!("{method} {}", uri.path()));
        observed.locker_actions.push((number.clone(), action));
    }
    Json(json!({"lockerNumber": number, "lockerStatus": status})).into_response()
}
