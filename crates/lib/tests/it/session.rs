use pragyan::{
    SessionStatus,
    session::{BootstrapOutcome, SessionOrigin},
};

use crate::helpers::*;

#[tokio::test]
async fn no_credential_means_no_requests() {
    let ctx = TestContext::builder().with_fake_backend().build().await;

    let outcome = ctx.bootstrapper().run().await.clone();

    assert_eq!(outcome, BootstrapOutcome::Anonymous);
    assert_eq!(ctx.fake().observed().me_calls, 0);
    assert_eq!(ctx.store.status(), SessionStatus::Uninitialized);
}

#[tokio::test]
async fn accepted_credential_resumes_alice() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    let outcome = ctx.bootstrapper().run().await.clone();

    assert_eq!(outcome, BootstrapOutcome::Authenticated(identity(alice())));
    let session = ctx.store.snapshot();
    assert_eq!(session.status(), SessionStatus::Ready);
    assert_eq!(session.origin(), Some(SessionOrigin::Resumed));
    assert_eq!(session.identity().unwrap().username, "alice");

    let observed = ctx.fake().observed();
    assert_eq!(observed.me_calls, 1);
    assert_eq!(
        observed.authorizations,
        vec![Some("Bearer tok-123".to_string())]
    );
    assert_eq!(observed.request_ids.len(), 1);
}

#[tokio::test]
async fn refused_credential_is_erased() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-expired")
        .build()
        .await;

    let outcome = ctx.bootstrapper().run().await.clone();

    assert!(matches!(outcome, BootstrapOutcome::Rejected { .. }));
    assert!(ctx.store.identity().is_none());
    assert!(ctx.store.credential().is_none());
    assert_eq!(ctx.persisted_credential(), None);
}

#[tokio::test]
async fn empty_identity_response_is_a_rejection() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-empty")
        .build()
        .await;

    let outcome = ctx.bootstrapper().run().await.clone();

    assert!(matches!(outcome, BootstrapOutcome::Rejected { .. }));
    assert_eq!(ctx.persisted_credential(), None);
}

#[tokio::test]
async fn unreachable_service_is_a_rejection() {
    let ctx = TestContext::builder()
        .with_credential("tok-123")
        .build()
        .await;

    let outcome = ctx.bootstrapper().run().await.clone();

    assert!(matches!(outcome, BootstrapOutcome::Rejected { .. }));
    assert_eq!(ctx.store.status(), SessionStatus::Uninitialized);
    assert_eq!(ctx.persisted_credential(), None);
}

#[tokio::test]
async fn resumed_session_survives_file_storage() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_file_storage()
        .with_credential("tok-root")
        .build()
        .await;

    let outcome = ctx.bootstrapper().run().await.clone();

    assert!(outcome.is_authenticated());
    assert!(ctx.store.snapshot().is_admin());
    assert_eq!(ctx.persisted_credential().as_deref(), Some("tok-root"));
}
