//! Client configuration for the Paylio gateway.

use std::env;
use std::fmt;

use crate::{Error, Result};

/// Default hosted-payment-page base URL.
pub const DEFAULT_GATEWAY_BASE: &str = "https://gateway.paylio.com";
/// Default direct API base URL.
pub const DEFAULT_API_BASE: &str = "https://gateway.paylio.com/api";

/// Execution environment the gateway routes traffic through.
///
/// The tag is part of the checksum input and of the hosted-page URL, so it
/// must match what the gateway expects exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production traffic.
    Live,
    /// Sandbox traffic.
    Demo,
    /// A custom environment tag agreed with the gateway.
    Named(String),
}

impl Environment {
    /// The wire tag used in checksums and gateway URLs.
    pub fn as_str(&self) -> &str {
        match self {
            Environment::Live => "live",
            Environment::Demo => "demo",
            Environment::Named(tag) => tag,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Environment {
    fn from(tag: &str) -> Self {
        match tag {
            "live" => Environment::Live,
            "demo" => Environment::Demo,
            other => Environment::Named(other.to_string()),
        }
    }
}

/// Immutable client configuration.
///
/// Construct once and hand it to [`ApiClient`](crate::ApiClient) and
/// [`Gateway`](crate::Gateway); there is no process-wide state.
#[derive(Clone)]
pub struct Config {
    /// Site identifier assigned by the gateway.
    pub site_id: i64,
    /// Shared secret used for checksum computation.
    pub secret: String,
    /// Environment tag.
    pub environment: Environment,
    /// Base URL for direct API calls.
    pub api_base: String,
    /// Base URL for the hosted payment page.
    pub gateway_base: String,
}

impl Config {
    /// Create a configuration with the production defaults.
    pub fn new(site_id: i64, secret: impl Into<String>) -> Self {
        Self {
            site_id,
            secret: secret.into(),
            environment: Environment::Live,
            api_base: DEFAULT_API_BASE.to_string(),
            gateway_base: DEFAULT_GATEWAY_BASE.to_string(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_gateway_base(mut self, gateway_base: impl Into<String>) -> Self {
        self.gateway_base = gateway_base.into();
        self
    }

    /// Load configuration from `PAYLIO_*` environment variables.
    ///
    /// `PAYLIO_SITE_ID` and `PAYLIO_SECRET` are required; `PAYLIO_ENV`,
    /// `PAYLIO_API_BASE` and `PAYLIO_GATEWAY_BASE` override the defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let site_id = env::var("PAYLIO_SITE_ID")
            .map_err(|_| Error::Config {
                message: "PAYLIO_SITE_ID environment variable not set".to_string(),
            })?
            .parse()
            .map_err(|_| Error::Config {
                message: "PAYLIO_SITE_ID must be an integer".to_string(),
            })?;
        let secret = env::var("PAYLIO_SECRET").map_err(|_| Error::Config {
            message: "PAYLIO_SECRET environment variable not set".to_string(),
        })?;

        let mut config = Config::new(site_id, secret);
        if let Ok(tag) = env::var("PAYLIO_ENV") {
            config.environment = Environment::from(tag.as_str());
        }
        if let Ok(base) = env::var("PAYLIO_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = env::var("PAYLIO_GATEWAY_BASE") {
            config.gateway_base = base;
        }

        Ok(config)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("site_id", &self.site_id)
            .field("secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("api_base", &self.api_base)
            .field("gateway_base", &self.gateway_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(1000, "secret");
        assert_eq!(config.environment, Environment::Live);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.gateway_base, DEFAULT_GATEWAY_BASE);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new(1000, "secret")
            .with_environment(Environment::Demo)
            .with_api_base("https://localhost:8443/api")
            .with_gateway_base("https://localhost:8443");

        assert_eq!(config.environment, Environment::Demo);
        assert_eq!(config.api_base, "https://localhost:8443/api");
        assert_eq!(config.gateway_base, "https://localhost:8443");
    }

    #[test]
    fn test_environment_tags() {
        assert_eq!(Environment::Live.as_str(), "live");
        assert_eq!(Environment::Demo.as_str(), "demo");
        assert_eq!(Environment::Named("staging".to_string()).as_str(), "staging");

        assert_eq!(Environment::from("live"), Environment::Live);
        assert_eq!(Environment::from("demo"), Environment::Demo);
        assert_eq!(
            Environment::from("staging"),
            Environment::Named("staging".to_string())
        );
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let config = Config::new(1000, "super-secret-value");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-secret-value"));
    }
}
