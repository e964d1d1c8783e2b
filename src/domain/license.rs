//! License key records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates;

/// Result of `/license/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseValidation {
    pub license_code: String,

    pub is_valid: bool,

    /// Expiry, absent for perpetual licenses.
    #[serde(default, with = "dates::optional_timestamp")]
    pub expiry_date: Option<DateTime<Utc>>,

    /// Maximum number of activations.
    pub activations_limit: u32,

    pub times_activated: u32,
}

impl LicenseValidation {
    /// Activations left before the limit is reached.
    pub fn remaining_activations(&self) -> u32 {
        self.activations_limit.saturating_sub(self.times_activated)
    }
}

/// Result of `/license/activate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseActivation {
    pub license_code: String,

    pub activated: bool,

    /// Vendor message describing the outcome.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation(limit: u32, activated: u32) -> LicenseValidation {
        LicenseValidation {
            license_code: "KEY".to_string(),
            is_valid: true,
            expiry_date: None,
            activations_limit: limit,
            times_activated: activated,
        }
    }

    #[test]
    fn remaining_activations_saturates() {
        assert_eq!(validation(5, 1).remaining_activations(), 4);
        assert_eq!(validation(1, 3).remaining_activations(), 0);
    }

    #[test]
    fn perpetual_license_has_no_expiry() {
        let parsed: LicenseValidation = serde_json::from_value(json!({
            "license_code": "TEST-LICENSE-123",
            "is_valid": true,
            "activations_limit": 5,
            "times_activated": 1
        }))
        .unwrap();
        assert_eq!(parsed.expiry_date, None);
    }
}
