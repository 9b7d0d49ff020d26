//! Tracing setup for test binaries

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize tracing for a test binary.
///
/// Safe to call from every test; only the first call installs the
/// subscriber. The filter honors `STOREFRONT_LOG` (e.g.
/// `STOREFRONT_LOG=storefront_harness=debug`) and defaults to `info`.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("STOREFRONT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
