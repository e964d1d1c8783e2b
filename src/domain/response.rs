//! Response envelope shared by every vendor API endpoint.

use serde::{Deserialize, Serialize};

/// Successful vendor API response.
///
/// Every endpoint wraps its payload as `{"success": true, "response": ...}`.
/// The payload is required: a body without `response` does not deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleResponse<T> {
    /// Whether the vendor API reported success.
    pub success: bool,

    /// Operation-specific payload.
    pub response: T,
}

impl<T> PaddleResponse<T> {
    /// Consumes the envelope and returns the payload.
    pub fn into_inner(self) -> T {
        self.response
    }
}

/// Error object the vendor API sends alongside `"success": false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Vendor error code.
    pub code: i64,

    /// Human-readable message.
    pub message: String,
}

/// Failure envelope: `{"success": false, "error": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FailureEnvelope {
    pub success: bool,
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_payload_is_rejected() {
        let body = json!({"success": true});
        let result: Result<PaddleResponse<String>, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn failure_envelope_parses_error_object() {
        let body = json!({"success": false, "error": {"code": 107, "message": "You don't have permission"}});
        let failure: FailureEnvelope = serde_json::from_value(body).unwrap();
        assert!(!failure.success);
        assert_eq!(failure.error.code, 107);
    }

    #[test]
    fn into_inner_returns_payload() {
        let envelope = PaddleResponse {
            success: true,
            response: vec![1, 2, 3],
        };
        assert_eq!(envelope.into_inner(), vec![1, 2, 3]);
    }
}
