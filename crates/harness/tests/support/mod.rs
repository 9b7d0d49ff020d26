//! Shared helpers for harness integration tests

use std::net::TcpListener;
use std::time::Duration;

use storefront_harness::HarnessConfig;

/// Config preferring an ephemeral mock port, so parallel tests never race
/// over a fixed one.
pub fn ephemeral_config() -> HarnessConfig {
    HarnessConfig::default().with_preferred_port(0)
}

/// Wait until `port` can be bound again, dropping the probe listener.
///
/// Responder shutdown releases the port as the server task winds down;
/// polling avoids asserting on the exact timing.
pub async fn wait_for_port_free(port: u16) {
    for _ in 0..100 {
        if TcpListener::bind(("127.0.0.1", port)).is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("port {port} was not released within 2 seconds");
}
