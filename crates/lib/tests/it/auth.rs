use pragyan::{
    SessionStatus,
    auth::{SignupForm, SignupOutcome},
    session::SessionOrigin,
};

use crate::helpers::*;

fn signup_form(username: &str) -> SignupForm {
    SignupForm {
        username: username.to_string(),
        email: format!("{username}@pragyan.test"),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
        first_name: "Bob".to_string(),
        last_name: "Lee".to_string(),
        phone_number: Some("  ".to_string()),
    }
}

#[tokio::test]
async fn login_establishes_and_persists_the_session() {
    let ctx = TestContext::builder().with_fake_backend().build().await;

    let identity = ctx.auth().login("alice", "secret").await.unwrap();

    assert_eq!(identity.username, "alice");
    let session = ctx.store.snapshot();
    assert!(session.is_authenticated());
    assert!(!session.is_admin());
    assert_eq!(session.origin(), Some(SessionOrigin::Login));
    assert_eq!(ctx.persisted_credential().as_deref(), Some("tok-alice"));
}

#[tokio::test]
async fn admin_login_is_recognised() {
    let ctx = TestContext::builder().with_fake_backend().build().await;
    ctx.auth().login("root", "secret").await.unwrap();
    assert!(ctx.store.snapshot().is_admin());
}

#[tokio::test]
async fn refused_login_surfaces_the_backend_message() {
    let ctx = TestContext::builder().with_fake_backend().build().await;

    let err = ctx.auth().login("alice", "wrong").await.unwrap_err();

    assert!(err.is_authentication_error());
    assert_eq!(err.user_message(), "Invalid username or password");
    let session = ctx.store.snapshot();
    assert_eq!(session.status(), SessionStatus::Error);
    assert_eq!(session.error_message(), Some("Invalid username or password"));
    assert_eq!(ctx.persisted_credential(), None);
}

#[tokio::test]
async fn unreachable_login_uses_generic_message() {
    let ctx = TestContext::builder().build().await;

    let err = ctx.auth().login("alice", "secret").await.unwrap_err();

    assert_eq!(err.user_message(), "Login failed");
    assert_eq!(ctx.store.snapshot().error_message(), Some("Login failed"));
}

#[tokio::test]
async fn signup_registers_a_customer() {
    let ctx = TestContext::builder().with_fake_backend().build().await;

    let outcome = ctx.auth().signup(&signup_form("bob")).await.unwrap();

    assert_eq!(
        outcome,
        SignupOutcome::Registered {
            message: "User registered successfully!".to_string()
        }
    );
    assert!(!ctx.store.is_authenticated());

    let observed = ctx.fake().observed();
    let body = &observed.signup_bodies[0];
    assert_eq!(body["roles"], serde_json::json!(["customer"]));
    assert_eq!(body["firstName"], "Bob");
    assert!(body.get("confirmPassword").is_none());
    assert!(body.get("phoneNumber").is_none());
}

#[tokio::test]
async fn refused_signup_surfaces_the_backend_message() {
    let ctx = TestContext::builder().with_fake_backend().build().await;

    let err = ctx.auth().signup(&signup_form("taken")).await.unwrap_err();

    assert_eq!(err.user_message(), "Error: Username is already taken!");
    assert!(!err.is_authentication_error());
}

#[tokio::test]
async fn logout_clears_a_resumed_session() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_file_storage()
        .with_credential("tok-123")
        .build()
        .await;
    ctx.bootstrapper().run().await;
    assert!(ctx.store.is_authenticated());

    ctx.auth().logout();

    assert!(ctx.store.identity().is_none());
    assert!(ctx.store.credential().is_none());
    assert_eq!(ctx.persisted_credential(), None);
}
