use pragyan::{
    routing::{AccessState, Chrome, Decision, Notice, Route, resolve},
    storage,
};

use crate::helpers::*;

fn access(ctx: &TestContext) -> AccessState {
    AccessState::from_session(
        &ctx.store.snapshot(),
        storage::has_persisted_credential(ctx.storage.as_ref()),
    )
}

#[tokio::test]
async fn resumed_customer_scenario() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-123")
        .build()
        .await;

    ctx.bootstrapper().run().await;

    let access = access(&ctx);
    assert_eq!(access, AccessState::Standard);
    assert_eq!(
        resolve(Route::Dashboard, access),
        Decision::Render {
            route: Route::Dashboard,
            chrome: Some(Chrome::Standard)
        }
    );
    assert_eq!(
        resolve(Route::AdminDashboard, access),
        Decision::Redirect {
            to: Route::Dashboard,
            notice: Some(Notice::AdminRequired)
        }
    );
}

#[tokio::test]
async fn loading_blocks_rendering_until_bootstrap_finishes() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-root")
        .build()
        .await;

    ctx.store.begin_load();
    assert_eq!(resolve(Route::Login, access(&ctx)), Decision::Loading);

    ctx.bootstrapper().run().await;
    assert_eq!(access(&ctx), AccessState::Administrator);
    assert_eq!(
        resolve(Route::Login, access(&ctx)),
        Decision::Redirect {
            to: Route::AdminDashboard,
            notice: None
        }
    );
}

#[tokio::test]
async fn rejected_bootstrap_lands_on_login() {
    let ctx = TestContext::builder()
        .with_fake_backend()
        .with_credential("tok-revoked")
        .build()
        .await;

    ctx.bootstrapper().run().await;

    assert_eq!(access(&ctx), AccessState::Anonymous);
    assert_eq!(
        resolve(Route::Dashboard, access(&ctx)),
        Decision::Redirect {
            to: Route::Login,
            notice: None
        }
    );
}

#[tokio::test]
async fn logout_is_enforced_on_the_next_navigation() {
    let ctx = TestContext::builder().with_fake_backend().build().await;
    let auth = ctx.auth();
    auth.login("root", "secret").await.unwrap();
    assert!(matches!(
        resolve(Route::AdminLoans, access(&ctx)),
        Decision::Render { .. }
    ));

    auth.logout();

    assert_eq!(
        resolve(Route::AdminLoans, access(&ctx)),
        Decision::Redirect {
            to: Route::Login,
            notice: None
        }
    );
}
