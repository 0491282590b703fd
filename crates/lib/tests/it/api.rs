use pragyan::api::accounts::{TransactionRequest, total_balance};

use crate::helpers::*;

#[tokio::test]
async fn requests_carry_the_stored_credential() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    let accounts = ctx.bank.accounts.accounts_for_user(1).await.unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].account_number, "ACC1001");
    assert_eq!(total_balance(&accounts), 1500.75);
    assert_eq!(
        ctx.fake().observed().authorizations,
        vec![Some("Bearer tok-123".to_string())]
    );
}

#[tokio::test]
async fn credential_is_read_on_every_request() {
    let ctx = TestContext::builder().with_fake_backend().build().await;

    let err = ctx.bank.accounts.accounts_for_user(1).await.unwrap_err();
    assert!(err.is_authentication_error());

    ctx.auth().login("alice", "secret").await.unwrap();
    ctx.bank.accounts.accounts_for_user(1).await.unwrap();

    let observed = ctx.fake().observed();
    let authorizations = &observed.authorizations;
    assert_eq!(authorizations[0], None);
    assert_eq!(authorizations.last().unwrap().as_deref(), Some("Bearer tok-alice"));
    // Each request gets its own correlation id.
    let mut ids = observed.request_ids.clone();
    ids.dedup();
    assert_eq!(ids.len(), observed.request_ids.len());
}

#[tokio::test]
async fn backend_rejection_keeps_its_message() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    let err = ctx
        .bank
        .accounts
        .deposit(&TransactionRequest::deposit("missing", 10.0, None))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Account not found");
    assert_eq!(err.module(), "api");
}

#[tokio::test]
async fn deposit_sends_default_description() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    let txn = ctx
        .bank
        .accounts
        .deposit(&TransactionRequest::deposit("ACC1001", 25.5, None))
        .await
        .unwrap();

    assert_eq!(txn.amount, 25.5);
    assert_eq!(txn.description.as_deref(), Some("Deposit to account"));
    let observed = ctx.fake().observed();
    assert_eq!(observed.deposits[0]["transactionType"], "DEPOSIT");
}

#[tokio::test]
async fn admin_review_lists_every_status() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-root")
        .build()
        .await;

    let apps = ctx
        .bank
        .accounts
        .applications_by_status("ALL")
        .await
        .unwrap();

    assert_eq!(apps.len(), 2);
    assert!(apps[1].awaits_account());
}

#[tokio::test]
async fn bodiless_put_decodes_the_card() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    let card = ctx.bank.credit_cards.block("4111222233334444").await.unwrap();

    assert!(card.is_blocked());
    assert_eq!(card.masked_number(), "**** **** **** 4444");
}

#[tokio::test]
async fn empty_list_decodes() {
    let ctx = TestContext::builder().with_fake_backend().build().await;
    assert!(ctx.bank.lockers.available().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let ctx = TestContext::builder().with_credential("tok-123").build().await;

    let err = ctx.bank.lockers.available().await.unwrap_err();

    assert!(err.is_network_error());
    assert!(!err.is_authentication_error());
}

#[tokio::test]
async fn identifiers_stay_inside_their_path_segment() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    let locker = ctx.bank.lockers.renew("L1/release#").await.unwrap();

    assert_eq!(locker.locker_number, "L1/release#");
    assert_eq!(locker.locker_status.as_deref(), Some("OCCUPIED"));
    let observed = ctx.fake().observed();
    assert_eq!(
        observed.requests,
        vec!["PUT /api/lockers/L1%2Frelease%23/renew".to_string()]
    );
    assert_eq!(
        observed.locker_actions,
        vec![("L1/release#".to_string(), "renew".to_string())]
    );
}

#[tokio::test]
async fn dot_segments_are_refused_before_sending() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    for number in ["..", ".", " "] {
        let err = ctx.bank.lockers.release(number).await.unwrap_err();
        assert_eq!(err.module(), "api");
    }

    let observed = ctx.fake().observed();
    assert!(observed.requests.is_empty());
    assert!(observed.authorizations.is_empty());
}
