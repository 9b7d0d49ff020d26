//! Registry holding the active server provider and published base URL

use tracing::info;
use wiremock::MockServer;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::mock::MockServerProvider;
use crate::provider::{EnvironmentDescriptor, ServerProvider};
use crate::real::RealServerProvider;
use crate::request::RequestSpec;

/// The single slot every test and helper resolves its target through.
///
/// A plain value, constructor-injected into the lifecycle controller —
/// nothing here is process-global, so registry behavior is testable in
/// isolation. Exactly one provider is active at a time: switching shuts
/// down the previous provider before initializing the new one, so two mock
/// responders never hold ports simultaneously.
pub struct EnvironmentRegistry {
    config: HarnessConfig,
    active: Option<Box<dyn ServerProvider>>,
    base_url: String,
}

impl EnvironmentRegistry {
    /// Create an empty registry; no provider is active until a `select_*`
    /// call runs.
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            active: None,
            base_url: String::new(),
        }
    }

    /// Activate a mock provider on the configured preferred port.
    pub async fn select_mock(&mut self) -> HarnessResult<()> {
        let port = self.config.preferred_port;
        self.select_mock_on_port(port).await
    }

    /// Activate a mock provider preferring a specific port.
    pub async fn select_mock_on_port(&mut self, port: u16) -> HarnessResult<()> {
        let provider = MockServerProvider::new(port, self.config.timeout);
        self.activate(Box::new(provider)).await
    }

    /// Activate a real provider targeting `url`.
    pub async fn select_real(&mut self, url: impl Into<String>) -> HarnessResult<()> {
        let provider = RealServerProvider::new(url, self.config.timeout);
        self.activate(Box::new(provider)).await
    }

    /// Shutdown-before-activate switch. The ordering is mandatory: the
    /// previous provider must release its resources before the new one
    /// initializes.
    async fn activate(&mut self, mut provider: Box<dyn ServerProvider>) -> HarnessResult<()> {
        if let Some(mut previous) = self.active.take() {
            previous.shutdown().await;
        }

        provider.initialize().await?;
        self.base_url = provider.base_url().to_string();
        self.active = Some(provider);

        info!("Active environment: {}", self.base_url);
        Ok(())
    }

    /// The currently active provider, if any.
    pub fn provider(&self) -> Option<&dyn ServerProvider> {
        self.active.as_deref()
    }

    /// The globally published base URL. Empty until a provider is active;
    /// read it through the registry rather than caching it past a switch.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the active provider is mock-backed.
    pub fn is_mock(&self) -> bool {
        self.active.as_ref().is_some_and(|p| p.is_mock())
    }

    /// The active mock responder, when the active provider owns one.
    pub fn mock(&self) -> Option<&MockServer> {
        self.active.as_ref().and_then(|p| p.mock())
    }

    /// Descriptor of the active environment.
    pub fn descriptor(&self) -> Option<EnvironmentDescriptor> {
        self.active.as_ref().map(|p| p.descriptor())
    }

    /// A fresh request spec from the active provider.
    pub fn request_spec(&self) -> HarnessResult<RequestSpec> {
        self.active
            .as_ref()
            .ok_or(HarnessError::NoActiveProvider)?
            .request_spec()
    }

    /// Reset the active provider's state, if one is active.
    pub async fn reset_active(&mut self) {
        if let Some(provider) = self.active.as_mut() {
            provider.reset().await;
        }
    }

    /// Shut down and drop the active provider, if one is active.
    pub async fn shutdown_active(&mut self) {
        if let Some(mut provider) = self.active.take() {
            provider.shutdown().await;
        }
        self.base_url.clear();
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }
}
