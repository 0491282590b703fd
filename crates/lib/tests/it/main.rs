/*! Integration tests for Pragyan.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - session: Startup bootstrap against a live (fake) identity service
 * - auth: Login, signup and logout through the AuthFlow
 * - api: The typed service clients and their error mapping
 * - routing: End-to-end navigation decisions over real sessions
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("pragyan=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod api;
mod auth;
mod context;
mod helpers;
mod routing;
mod session;
