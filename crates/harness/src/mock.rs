//! Mock-backed server provider

use std::net::TcpListener;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};
use wiremock::MockServer;

use crate::error::{HarnessError, HarnessResult};
use crate::provider::ServerProvider;
use crate::request::RequestSpec;

/// Provider owning an in-process programmable mock responder.
///
/// Attempts to bind the preferred port at startup and falls back to an
/// ephemeral port when it is occupied, so two environments can coexist on
/// one machine without configuration.
pub struct MockServerProvider {
    preferred_port: u16,
    timeout: Duration,
    server: Option<MockServer>,
    base_url: String,
}

impl MockServerProvider {
    /// Create a provider that will prefer `port` when started.
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self {
            preferred_port: port,
            timeout,
            server: None,
            base_url: String::new(),
        }
    }

    /// The port the responder actually bound, once running.
    pub fn port(&self) -> Option<u16> {
        self.server.as_ref().map(|s| s.address().port())
    }
}

#[async_trait]
impl ServerProvider for MockServerProvider {
    async fn initialize(&mut self) -> HarnessResult<()> {
        if self.server.is_some() {
            return Ok(()); // Already running
        }

        let server = match TcpListener::bind(("127.0.0.1", self.preferred_port)) {
            Ok(listener) => MockServer::builder().listener(listener).start().await,
            Err(e) => {
                warn!(
                    "Could not bind mock responder to port {}, using an ephemeral port: {}",
                    self.preferred_port, e
                );
                MockServer::start().await
            }
        };

        info!(
            "Mock responder listening on port {}",
            server.address().port()
        );
        self.base_url = format!("http://127.0.0.1:{}", server.address().port());
        self.server = Some(server);
        Ok(())
    }

    async fn reset(&mut self) {
        if let Some(server) = &self.server {
            info!("Resetting mock responder state");
            server.reset().await;
        }
    }

    async fn shutdown(&mut self) {
        if let Some(server) = self.server.take() {
            info!(
                "Stopping mock responder on port {}",
                server.address().port()
            );
            drop(server);
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_spec(&self) -> HarnessResult<RequestSpec> {
        if self.server.is_none() {
            return Err(HarnessError::NotInitialized);
        }
        RequestSpec::new(self.base_url.clone(), self.timeout)
    }

    fn is_mock(&self) -> bool {
        true
    }

    fn mock(&self) -> Option<&MockServer> {
        self.server.as_ref()
    }
}
