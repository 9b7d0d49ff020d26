//! Real-backend server provider

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::HarnessResult;
use crate::provider::ServerProvider;
use crate::request::RequestSpec;

/// Provider targeting an already-running remote backend.
///
/// There is no process to manage: the URL is stored verbatim, and no
/// connectivity check is performed — an unreachable target surfaces as a
/// request failure on the first call.
pub struct RealServerProvider {
    base_url: String,
    timeout: Duration,
}

impl RealServerProvider {
    /// Create a provider for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ServerProvider for RealServerProvider {
    async fn initialize(&mut self) -> HarnessResult<()> {
        info!("Targeting real server at {}", self.base_url);
        Ok(())
    }

    async fn reset(&mut self) {
        debug!("Reset is not applicable for a real server");
    }

    async fn shutdown(&mut self) {
        debug!("Shutdown is not applicable for a real server");
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_spec(&self) -> HarnessResult<RequestSpec> {
        RequestSpec::new(self.base_url.clone(), self.timeout)
    }

    fn is_mock(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_url_stored_verbatim() {
        let mut provider = RealServerProvider::new(
            "https://api.example.com",
            Duration::from_secs(1),
        );
        provider.initialize().await.unwrap();
        assert_eq!(provider.base_url(), "https://api.example.com");
        assert!(!provider.is_mock());
        assert!(provider.mock().is_none());
    }
}
