//! Client configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PADDLE` prefix and `__` as the separator.
//!
//! # Example
//!
//! ```no_run
//! use paddle_vendor::config::PaddleConfig;
//!
//! let config = PaddleConfig::load().expect("Failed to load configuration");
//! println!("Using {}", config.effective_base_url());
//! ```

mod environment;
mod error;
mod paddle;

pub use environment::{Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use error::{ConfigError, ValidationError};
pub use paddle::PaddleConfig;

impl PaddleConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PADDLE` prefix
    /// 3. Deserializes into [`PaddleConfig`]
    /// 4. Validates the result
    ///
    /// # Environment Variable Format
    ///
    /// - `PADDLE__API_KEY=...` -> `api_key`
    /// - `PADDLE__VENDOR_ID=12345` -> `vendor_id`
    /// - `PADDLE__ENVIRONMENT=sandbox` -> `environment`
    /// - `PADDLE__TIMEOUT_SECS=10` -> `timeout_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed or fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config: PaddleConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PADDLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}
