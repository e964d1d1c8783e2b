//! Vendor API configuration

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::environment::Environment;
use super::error::ValidationError;

/// Upper bound for the per-request timeout.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Vendor API configuration
#[derive(Clone, Deserialize)]
pub struct PaddleConfig {
    /// Vendor auth code (API key)
    #[serde(default)]
    pub api_key: String,

    /// Vendor ID
    #[serde(default)]
    pub vendor_id: String,

    /// Sandbox or production
    #[serde(default)]
    pub environment: Environment,

    /// Override for the environment's base URL
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// PEM public key used to verify webhooks
    pub webhook_public_key: Option<String>,
}

impl PaddleConfig {
    /// Create a configuration with default timeout and no overrides.
    pub fn new(
        api_key: impl Into<String>,
        vendor_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            vendor_id: vendor_id.into(),
            environment,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            webhook_public_key: None,
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL requests go to: the override if set, else the environment's.
    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    /// Validate vendor API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PADDLE__API_KEY"));
        }
        if self.vendor_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PADDLE__VENDOR_ID"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(url) = &self.base_url {
            let is_https = url.starts_with("https://");
            if !is_https && !url.starts_with("http://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
            // Plain HTTP is only for local mock servers.
            if !is_https && !self.environment.is_sandbox() {
                return Err(ValidationError::BaseUrlMustBeHttps);
            }
        }

        if let Some(key) = &self.webhook_public_key {
            if !key.trim_start().starts_with("-----BEGIN ") {
                return Err(ValidationError::InvalidWebhookPublicKey);
            }
        }

        Ok(())
    }
}

impl fmt::Debug for PaddleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaddleConfig")
            .field("api_key", &"[REDACTED]")
            .field("vendor_id", &self.vendor_id)
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("webhook_public_key", &self.webhook_public_key.is_some())
            .finish()
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaddleConfig {
        PaddleConfig::new("auth_code_123", "12345", Environment::Sandbox)
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = PaddleConfig {
            api_key: "   ".to_string(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PADDLE__API_KEY"))
        );
    }

    #[test]
    fn test_validation_missing_vendor_id() {
        let config = PaddleConfig {
            vendor_id: String::new(),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PADDLE__VENDOR_ID"))
        );
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let zero = PaddleConfig {
            timeout_secs: 0,
            ..valid_config()
        };
        let huge = PaddleConfig {
            timeout_secs: 301,
            ..valid_config()
        };
        assert_eq!(zero.validate(), Err(ValidationError::InvalidTimeout));
        assert_eq!(huge.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_base_url_scheme() {
        let config = PaddleConfig {
            base_url: Some("ftp://example.com".to_string()),
            ..valid_config()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_validation_plain_http_only_in_sandbox() {
        let sandbox = PaddleConfig {
            base_url: Some("http://127.0.0.1:9000".to_string()),
            ..valid_config()
        };
        assert!(sandbox.validate().is_ok());

        let production = PaddleConfig {
            environment: Environment::Production,
            ..sandbox
        };
        assert_eq!(
            production.validate(),
            Err(ValidationError::BaseUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_webhook_key_must_be_pem() {
        let config = PaddleConfig {
            webhook_public_key: Some("not a key".to_string()),
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidWebhookPublicKey)
        );
    }

    #[test]
    fn test_effective_base_url() {
        let config = valid_config();
        assert_eq!(
            config.effective_base_url(),
            "https://sandbox-vendors.paddle.com/api/2.0"
        );

        let overridden = PaddleConfig {
            base_url: Some("http://localhost:8080".to_string()),
            ..valid_config()
        };
        assert_eq!(overridden.effective_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", valid_config());
        assert!(!rendered.contains("auth_code_123"));
        assert!(rendered.contains("REDACTED"));
    }
}
