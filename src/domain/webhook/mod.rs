//! Inbound webhook authentication.
//!
//! - `canonical` - deterministic serialization of the signed fields
//! - `verifier` - RSA/SHA-1 signature check over that serialization

mod canonical;
mod verifier;

pub use canonical::canonicalize;
pub use verifier::{verify_signature, verify_webhook_fields, SIGNATURE_FIELD};
