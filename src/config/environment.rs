//! Vendor API environment selection

use serde::Deserialize;

/// Base URL of the sandbox vendor API.
pub const SANDBOX_BASE_URL: &str = "https://sandbox-vendors.paddle.com/api/2.0";

/// Base URL of the production vendor API.
pub const PRODUCTION_BASE_URL: &str = "https://vendors.paddle.com/api/2.0";

/// Vendor API environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Test transactions against the sandbox account.
    Sandbox,
    /// Real transactions.
    #[default]
    Production,
}

impl Environment {
    /// Base URL for this environment, without a trailing slash.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Check if this is the sandbox
    pub fn is_sandbox(&self) -> bool {
        *self == Environment::Sandbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls() {
        assert_eq!(
            Environment::Sandbox.base_url(),
            "https://sandbox-vendors.paddle.com/api/2.0"
        );
        assert_eq!(
            Environment::Production.base_url(),
            "https://vendors.paddle.com/api/2.0"
        );
    }

    #[test]
    fn defaults_to_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert!(!Environment::default().is_sandbox());
    }

    #[test]
    fn deserializes_lowercase() {
        let env: Environment = serde_json::from_str("\"sandbox\"").unwrap();
        assert!(env.is_sandbox());
    }
}
