//! Environment-backed configuration for the harness

use std::time::Duration;

use crate::error::{HarnessError, HarnessResult};

/// Preferred mock responder port when none is configured.
pub const DEFAULT_MOCK_PORT: u16 = 8080;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable naming the preferred mock port.
pub const ENV_MOCK_PORT: &str = "STOREFRONT_MOCK_PORT";

/// Environment variable pointing the suite at a deployed backend.
pub const ENV_REAL_URL: &str = "STOREFRONT_REAL_URL";

/// Environment variable overriding the HTTP request timeout (seconds).
pub const ENV_TIMEOUT_SEC: &str = "STOREFRONT_HTTP_TIMEOUT_SEC";

/// Configuration for a test environment
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Preferred fixed port for the mock responder; falls back to an
    /// ephemeral port when occupied.
    pub preferred_port: u16,

    /// When set, suite setup targets this URL instead of starting a mock.
    pub real_url: Option<String>,

    /// Timeout applied to every outgoing test request.
    pub timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            preferred_port: DEFAULT_MOCK_PORT,
            real_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    ///
    /// Set-but-invalid values are errors rather than silent defaults.
    pub fn from_env() -> HarnessResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = read_env(ENV_MOCK_PORT)? {
            config.preferred_port = raw.trim().parse().map_err(|_| {
                HarnessError::InvalidConfig(format!("{ENV_MOCK_PORT} must be a port number"))
            })?;
        }

        if let Some(raw) = read_env(ENV_REAL_URL)? {
            if raw.trim().is_empty() {
                return Err(HarnessError::InvalidConfig(format!(
                    "{ENV_REAL_URL} must not be empty"
                )));
            }
            config.real_url = Some(raw.trim().to_string());
        }

        if let Some(raw) = read_env(ENV_TIMEOUT_SEC)? {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                HarnessError::InvalidConfig(format!(
                    "{ENV_TIMEOUT_SEC} must be a positive integer number of seconds"
                ))
            })?;
            if secs == 0 {
                return Err(HarnessError::InvalidConfig(format!(
                    "{ENV_TIMEOUT_SEC} must be greater than zero"
                )));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Builder-style override of the preferred mock port.
    pub fn with_preferred_port(mut self, port: u16) -> Self {
        self.preferred_port = port;
        self
    }

    /// Builder-style override of the real backend URL.
    pub fn with_real_url(mut self, url: impl Into<String>) -> Self {
        self.real_url = Some(url.into());
        self
    }
}

/// Read an environment variable, enforcing UTF-8 validity.
fn read_env(name: &str) -> HarnessResult<Option<String>> {
    match std::env::var_os(name) {
        None => Ok(None),
        Some(raw) => raw
            .into_string()
            .map(Some)
            .map_err(|_| HarnessError::InvalidConfig(format!("{name} must be valid UTF-8"))),
    }
}
