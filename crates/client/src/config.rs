//! Client configuration
//!
//! Runtime settings for the API client, assembled in code or loaded from
//! `CLUBFLOW_*` environment variables.

use std::time::Duration;

use crate::errors::ApiError;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "CLUBFLOW_API_URL";
/// Environment variable holding the request timeout in whole seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "CLUBFLOW_API_TIMEOUT_SECS";
/// Environment variable holding the transport attempt budget.
pub const ENV_API_MAX_ATTEMPTS: &str = "CLUBFLOW_API_MAX_ATTEMPTS";

const DEFAULT_BASE_URL: &str = "https://api.clubflow.app";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_ATTEMPTS: usize = 3;
const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(200);

/// Configuration for the API client.
///
/// The base URL is kept as the raw string it was supplied as; it is
/// validated and normalized when the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the backend (e.g., "https://api.clubflow.app")
    pub base_url: String,
    /// Timeout for individual requests
    pub timeout: Duration,
    /// Total transport attempts per dispatch (initial try + retries)
    pub max_attempts: usize,
    /// Base delay for transport retry backoff
    pub base_backoff: Duration,
    /// User agent reported on every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: DEFAULT_BASE_BACKOFF,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from `CLUBFLOW_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_API_URL) {
            config.base_url = url;
        }

        if let Some(raw) = env_value(ENV_API_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                ApiError::Config(format!(
                    "{ENV_API_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = env_value(ENV_API_MAX_ATTEMPTS) {
            let attempts: usize = raw.parse().map_err(|_| {
                ApiError::Config(format!(
                    "{ENV_API_MAX_ATTEMPTS} must be a positive integer, got {raw:?}"
                ))
            })?;
            config.max_attempts = attempts.max(1);
        }

        Ok(config)
    }
}

fn default_user_agent() -> String {
    format!("clubflow-client/{}", env!("CARGO_PKG_VERSION"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_backoff, Duration::from_millis(200));
        assert!(config.user_agent.starts_with("clubflow-client/"));
    }

    /// Single test mutates the process environment so parallel test threads
    /// never observe each other's values.
    #[test]
    fn test_from_env_overrides_and_validation() {
        std::env::set_var(ENV_API_URL, "http://localhost:8000");
        std::env::set_var(ENV_API_TIMEOUT_SECS, "5");
        std::env::set_var(ENV_API_MAX_ATTEMPTS, "2");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_attempts, 2);

        // Whitespace-only values fall back to defaults.
        std::env::set_var(ENV_API_URL, "   ");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        // Non-numeric values are rejected, not silently defaulted.
        std::env::set_var(ENV_API_TIMEOUT_SECS, "soon");
        let err = ClientConfig::from_env().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_API_TIMEOUT_SECS);
        std::env::remove_var(ENV_API_MAX_ATTEMPTS);

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_attempts, 3);
    }
}
