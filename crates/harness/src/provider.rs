//! Server provider contract shared by mock and real test targets

use async_trait::async_trait;
use wiremock::MockServer;

use crate::error::HarnessResult;
use crate::request::RequestSpec;

/// The resolved connection target of an initialized provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentDescriptor {
    /// Fully resolved origin test requests are sent to.
    pub base_url: String,
    /// True when backed by the in-process mock responder.
    pub is_mock: bool,
}

/// Owns the lifecycle of a test target, mock or real.
///
/// Every operation is expressible without asking which variant is behind
/// the trait; the only variant-specific surface is [`ServerProvider::mock`],
/// which tests use to program stubs.
#[async_trait]
pub trait ServerProvider: Send + Sync {
    /// Start (mock) or record (real) the target. For the mock variant a
    /// preferred-port bind failure is recovered locally by falling back to
    /// an ephemeral port; it is not surfaced to the caller.
    async fn initialize(&mut self) -> HarnessResult<()>;

    /// Clear all stubs and recorded request history. No-op for a real
    /// target and for a provider that never started; idempotent.
    async fn reset(&mut self);

    /// Stop the target, releasing its port. No-op for a real target and
    /// for a provider that never started; idempotent.
    async fn shutdown(&mut self);

    /// Base URL of the target. Empty only before `initialize`.
    fn base_url(&self) -> &str;

    /// A fresh request specification targeting [`ServerProvider::base_url`],
    /// with URL-encoding pass-through and request/response logging.
    fn request_spec(&self) -> HarnessResult<RequestSpec>;

    /// True when this provider manages the in-process mock responder.
    fn is_mock(&self) -> bool;

    /// The mock responder, when this provider owns a running one. Tests
    /// use this for stubbing and history verification and skip those
    /// steps against a real backend.
    fn mock(&self) -> Option<&MockServer> {
        None
    }

    /// Descriptor for the initialized target.
    fn descriptor(&self) -> EnvironmentDescriptor {
        EnvironmentDescriptor {
            base_url: self.base_url().to_string(),
            is_mock: self.is_mock(),
        }
    }
}
