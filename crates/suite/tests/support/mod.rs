//! Shared setup for the Storefront endpoint suites
#![allow(dead_code)]

use storefront_harness::{FixtureDir, HarnessConfig, TestLifecycle};

/// Bearer token the stubs accept.
pub const TOKEN: &str = "mock-jwt-token";

/// Full `Authorization` header value for verification calls.
pub fn auth_header() -> String {
    format!("Bearer {TOKEN}")
}

/// Start a ready-to-use environment: mock by default, or the backend named
/// by `STOREFRONT_REAL_URL`.
pub async fn start_suite() -> TestLifecycle {
    storefront_harness::logging::init();
    let config = HarnessConfig::from_env().expect("invalid harness configuration");
    TestLifecycle::start(config)
        .await
        .expect("failed to set up test environment")
}

/// The suite's fixture directory.
pub fn fixtures() -> FixtureDir {
    FixtureDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}
