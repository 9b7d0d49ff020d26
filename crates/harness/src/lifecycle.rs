//! Suite/class/method lifecycle orchestration over the environment registry

use tracing::{debug, info};
use wiremock::MockServer;

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::registry::EnvironmentRegistry;
use crate::request::RequestSpec;

/// Where a lifecycle currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing has run yet.
    Unstarted,
    /// Suite setup done: the default provider is active.
    SuiteReady,
    /// Class setup done: specifications built for the active provider.
    ClassReady,
    /// Method setup done: fresh spec, mock state reset.
    MethodReady,
    /// Suite teardown done: the provider has been shut down.
    TornDown,
}

/// Shared base behavior for every test suite.
///
/// Orchestrates setup and teardown against the active environment:
///
/// - `setup_suite` selects the default provider (mock unless a real URL is
///   configured) — once per lifecycle.
/// - `setup_class` rebuilds the request specification — once per suite file.
/// - `setup_method` rebuilds the request specification *and* resets the
///   mock responder — before every test, which is what guarantees that no
///   test sees stubs, history, or headers from a previous one.
/// - `teardown_class` resets again (redundant but harmless; reset is
///   idempotent) and returns to `SuiteReady` so another class can run.
/// - `teardown_suite` shuts the active provider down.
///
/// Each Rust test function owns its own `TestLifecycle` (and therefore its
/// own registry), so cargo's test-thread parallelism never shares state.
pub struct TestLifecycle {
    registry: EnvironmentRegistry,
    state: LifecycleState,
    request_spec: Option<RequestSpec>,
}

impl TestLifecycle {
    /// Create an unstarted lifecycle around a fresh registry.
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            registry: EnvironmentRegistry::new(config),
            state: LifecycleState::Unstarted,
            request_spec: None,
        }
    }

    /// Convenience for the common single-test shape: runs suite, class,
    /// and method setup and returns a ready-to-use lifecycle.
    pub async fn start(config: HarnessConfig) -> HarnessResult<Self> {
        let mut lifecycle = Self::new(config);
        lifecycle.setup_suite().await?;
        lifecycle.setup_class().await?;
        lifecycle.setup_method().await?;
        Ok(lifecycle)
    }

    /// Run-once suite setup: select the default provider.
    pub async fn setup_suite(&mut self) -> HarnessResult<()> {
        if self.state != LifecycleState::Unstarted {
            return Err(self.invalid_transition("SuiteReady"));
        }

        match self.registry.config().real_url.clone() {
            Some(url) => self.registry.select_real(url).await?,
            None => self.registry.select_mock().await?,
        }

        self.state = LifecycleState::SuiteReady;
        Ok(())
    }

    /// Per-class setup: (re)build the request specification.
    pub async fn setup_class(&mut self) -> HarnessResult<()> {
        if !matches!(
            self.state,
            LifecycleState::SuiteReady | LifecycleState::MethodReady
        ) {
            return Err(self.invalid_transition("ClassReady"));
        }

        self.rebuild_request_spec()?;
        self.state = LifecycleState::ClassReady;
        Ok(())
    }

    /// Per-method setup: rebuild the request specification fresh and reset
    /// the mock responder so no stub or recorded request survives from a
    /// previous test.
    pub async fn setup_method(&mut self) -> HarnessResult<()> {
        if !matches!(
            self.state,
            LifecycleState::ClassReady | LifecycleState::MethodReady
        ) {
            return Err(self.invalid_transition("MethodReady"));
        }

        self.rebuild_request_spec()?;
        if self.registry.is_mock() {
            self.registry.reset_active().await;
        }

        self.state = LifecycleState::MethodReady;
        Ok(())
    }

    /// Alias for the per-method setup, for suites running several logical
    /// tests inside one test function.
    pub async fn begin_method(&mut self) -> HarnessResult<()> {
        self.setup_method().await
    }

    /// Per-class teardown: defensive extra reset when mock-backed.
    pub async fn teardown_class(&mut self) -> HarnessResult<()> {
        if !matches!(
            self.state,
            LifecycleState::ClassReady | LifecycleState::MethodReady
        ) {
            return Err(self.invalid_transition("SuiteReady"));
        }

        debug!("Tearing down test class");
        if self.registry.is_mock() {
            self.registry.reset_active().await;
        }

        self.state = LifecycleState::SuiteReady;
        Ok(())
    }

    /// Suite teardown: shut down whichever provider is active.
    pub async fn teardown_suite(&mut self) -> HarnessResult<()> {
        if self.state == LifecycleState::TornDown {
            return Err(self.invalid_transition("TornDown"));
        }

        info!("Shutting down test environment");
        self.registry.shutdown_active().await;
        self.request_spec = None;
        self.state = LifecycleState::TornDown;
        Ok(())
    }

    /// Class teardown followed by suite teardown.
    pub async fn finish(&mut self) -> HarnessResult<()> {
        if matches!(
            self.state,
            LifecycleState::ClassReady | LifecycleState::MethodReady
        ) {
            self.teardown_class().await?;
        }
        self.teardown_suite().await
    }

    /// Switch the active environment to a real backend, mid-class if
    /// needed. The published base URL and the request spec are refreshed.
    pub async fn switch_to_real(&mut self, url: impl Into<String>) -> HarnessResult<()> {
        self.ensure_ready("switch_to_real")?;
        self.registry.select_real(url).await?;
        self.rebuild_request_spec()
    }

    /// Switch the active environment back to a mock responder.
    pub async fn switch_to_mock(&mut self) -> HarnessResult<()> {
        self.ensure_ready("switch_to_mock")?;
        self.registry.select_mock().await?;
        self.rebuild_request_spec()
    }

    /// The current request specification. Returned by value so per-test
    /// headers go on an owned copy.
    pub fn request_spec(&self) -> HarnessResult<RequestSpec> {
        self.request_spec
            .clone()
            .ok_or(HarnessError::NotInitialized)
    }

    /// The active mock responder, if the environment is mock-backed.
    pub fn mock(&self) -> Option<&MockServer> {
        self.registry.mock()
    }

    /// Whether the active environment is mock-backed.
    pub fn is_mock(&self) -> bool {
        self.registry.is_mock()
    }

    /// The published base URL of the active environment.
    pub fn base_url(&self) -> &str {
        self.registry.base_url()
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &EnvironmentRegistry {
        &self.registry
    }

    /// Mutable access to the registry, for suites that drive switches
    /// directly.
    pub fn registry_mut(&mut self) -> &mut EnvironmentRegistry {
        &mut self.registry
    }

    /// Current state, for assertions on the lifecycle itself.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    fn rebuild_request_spec(&mut self) -> HarnessResult<()> {
        self.request_spec = Some(self.registry.request_spec()?);
        debug!("Request spec rebuilt for {}", self.registry.base_url());
        Ok(())
    }

    fn ensure_ready(&self, operation: &str) -> HarnessResult<()> {
        if matches!(
            self.state,
            LifecycleState::Unstarted | LifecycleState::TornDown
        ) {
            return Err(HarnessError::Lifecycle {
                from: format!("{:?}", self.state),
                to: operation.to_string(),
            });
        }
        Ok(())
    }

    fn invalid_transition(&self, to: &str) -> HarnessError {
        HarnessError::Lifecycle {
            from: format!("{:?}", self.state),
            to: to.to_string(),
        }
    }
}
