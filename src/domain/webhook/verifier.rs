//! Webhook signature verification.
//!
//! The provider signs the canonical payload (see [`canonicalize`]) with its
//! RSA private key using SHA-1 and PKCS#1 v1.5 padding, and sends the
//! base64 signature in the `p_signature` form field.
//!
//! Verification is a pure function. Every failure, whether a malformed key,
//! bad base64 or a signature mismatch, yields `false`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::{Digest, Sha1};
use thiserror::Error;

use super::canonical::canonicalize;

/// Form field that carries the signature in webhook deliveries.
pub const SIGNATURE_FIELD: &str = "p_signature";

/// Reasons a signature is rejected. Only surfaced through logs.
#[derive(Debug, Error)]
enum SignatureError {
    #[error("invalid public key: {0}")]
    PublicKey(String),

    #[error("invalid signature encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("signature mismatch: {0}")]
    Mismatch(#[from] rsa::Error),
}

/// Verifies a detached webhook signature.
///
/// - `signature` - base64 `p_signature` value
/// - `fields` - every webhook field except `p_signature`
/// - `public_key_pem` - the vendor public key, as `PUBLIC KEY` or `RSA PUBLIC KEY` PEM
///
/// Returns `true` only when the signature matches the canonical payload.
pub fn verify_signature<I, K, V>(signature: &str, fields: I, public_key_pem: &str) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let canonical = canonicalize(fields);

    match verify_canonical(signature, &canonical, public_key_pem) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "Webhook signature rejected");
            false
        }
    }
}

/// Verifies a complete webhook form, signature field included.
///
/// Splits `p_signature` off the remaining fields and verifies them against
/// it. A form without `p_signature` is rejected.
pub fn verify_webhook_fields<I, K, V>(fields: I, public_key_pem: &str) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut signature: Option<V> = None;
    let mut payload = Vec::new();

    for (key, value) in fields {
        if key.as_ref() == SIGNATURE_FIELD {
            signature = Some(value);
        } else {
            payload.push((key, value));
        }
    }

    match signature {
        Some(signature) => verify_signature(signature.as_ref(), payload, public_key_pem),
        None => {
            tracing::debug!("Webhook payload has no p_signature field");
            false
        }
    }
}

fn verify_canonical(
    signature: &str,
    canonical: &str,
    public_key_pem: &str,
) -> Result<(), SignatureError> {
    let public_key = decode_public_key(public_key_pem)?;
    let signature = STANDARD.decode(signature.trim())?;
    let digest = Sha1::digest(canonical.as_bytes());

    public_key.verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)?;
    Ok(())
}

fn decode_public_key(pem: &str) -> Result<RsaPublicKey, SignatureError> {
    let pem = pem.trim();

    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| SignatureError::PublicKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const PUBLIC_KEY: &str = include_str!("../../../tests/fixtures/webhook_public_key.pem");
    const PUBLIC_KEY_PKCS1: &str =
        include_str!("../../../tests/fixtures/webhook_public_key_pkcs1.pem");

    /// Produced with `openssl dgst -sha1 -sign` over
    /// `alert_id=123456789&event_time=2024-01-01%2012%3A00%3A00`.
    const OPENSSL_SIGNATURE: &str = "H1RBBW6sNBwarzhTI/R4dUS/a5Voh7KxZAfP8dxVy6B1qLXjZPcVU+Oce2qkbAyKq00SITJAUppu2HCEwl9kc7ZjeK8isSezncaTdo15lwqhWF+1uFlnCgkxbIkA4sgjlLHU96e4wM+Vmbn0EYhJ6LuomqiQVhH9rS/OuBSZpAQ=";

    fn alert_fields() -> HashMap<String, String> {
        HashMap::from([
            ("alert_id".to_string(), "123456789".to_string()),
            ("event_time".to_string(), "2024-01-01 12:00:00".to_string()),
        ])
    }

    #[test]
    fn dummy_signature_and_key_are_rejected() {
        assert!(!verify_signature(
            "test_signature",
            &alert_fields(),
            "test_public_key"
        ));
    }

    #[test]
    fn accepts_openssl_signature_with_spki_key() {
        assert!(verify_signature(OPENSSL_SIGNATURE, &alert_fields(), PUBLIC_KEY));
    }

    #[test]
    fn accepts_openssl_signature_with_pkcs1_key() {
        assert!(verify_signature(
            OPENSSL_SIGNATURE,
            &alert_fields(),
            PUBLIC_KEY_PKCS1
        ));
    }

    #[test]
    fn rejects_altered_value() {
        let mut fields = alert_fields();
        fields.insert("alert_id".to_string(), "123456780".to_string());
        assert!(!verify_signature(OPENSSL_SIGNATURE, &fields, PUBLIC_KEY));
    }

    #[test]
    fn rejects_extra_field() {
        let mut fields = alert_fields();
        fields.insert("passthrough".to_string(), "x".to_string());
        assert!(!verify_signature(OPENSSL_SIGNATURE, &fields, PUBLIC_KEY));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(!verify_signature("%%%not base64%%%", &alert_fields(), PUBLIC_KEY));
    }

    #[test]
    fn rejects_empty_mapping() {
        let empty: HashMap<String, String> = HashMap::new();
        assert!(!verify_signature(OPENSSL_SIGNATURE, &empty, PUBLIC_KEY));
    }

    #[test]
    fn rejects_truncated_signature() {
        let truncated = &OPENSSL_SIGNATURE[..40];
        assert!(!verify_signature(truncated, &alert_fields(), PUBLIC_KEY));
    }

    #[test]
    fn full_form_splits_signature_field() {
        let mut form = alert_fields();
        form.insert(SIGNATURE_FIELD.to_string(), OPENSSL_SIGNATURE.to_string());
        assert!(verify_webhook_fields(&form, PUBLIC_KEY));
    }

    #[test]
    fn full_form_without_signature_is_rejected() {
        assert!(!verify_webhook_fields(&alert_fields(), PUBLIC_KEY));
    }

    #[test]
    fn decode_public_key_reports_garbage() {
        assert!(matches!(
            decode_public_key("-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----"),
            Err(SignatureError::PublicKey(_))
        ));
    }
}
