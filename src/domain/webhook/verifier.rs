//! Webhook signature verification.
//!
//! Verifies the provider's `X-Signature` header: a hex-encoded HMAC-SHA256
//! over the raw request body, compared in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Mutex;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for provider webhook signatures.
///
/// The keyed MAC instance is cached behind a mutex after the first use. The
/// cache is an optimization only: a fresh instance is computed whenever the
/// lock is unavailable, and concurrent initializers produce identical values.
pub struct SignatureVerifier {
    secret: String,
    cached_mac: Mutex<Option<HmacSha256>>,
}

impl SignatureVerifier {
    /// Creates a verifier for the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cached_mac: Mutex::new(None),
        }
    }

    /// Verifies a hex-encoded signature against the raw request body.
    ///
    /// Fails closed: returns `false` on empty secret, empty signature, empty
    /// body, malformed hex, or length mismatch. Never returns an error.
    pub fn verify(&self, header_signature: &str, raw_body: &[u8]) -> bool {
        if self.secret.is_empty() || raw_body.is_empty() {
            return false;
        }

        let normalized = header_signature.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return false;
        }

        let expected = match hex::decode(&normalized) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let mut mac = self.mac();
        mac.update(raw_body);
        let computed = mac.finalize().into_bytes();

        // Length check up front; ct_eq requires equal-length inputs anyway.
        if computed.len() != expected.len() {
            return false;
        }

        computed.ct_eq(&expected).into()
    }

    /// Returns the keyed MAC, populating the cache on first use.
    fn mac(&self) -> HmacSha256 {
        if let Ok(mut guard) = self.cached_mac.lock() {
            if let Some(mac) = guard.as_ref() {
                return mac.clone();
            }
            let mac = build_mac(&self.secret);
            *guard = Some(mac.clone());
            return mac;
        }
        build_mac(&self.secret)
    }
}

fn build_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

/// Computes the hex-encoded signature a provider would send for a body.
///
/// Used by outbound test deliveries and by the test suites.
pub fn sign_body(secret: &str, raw_body: &[u8]) -> String {
    let mut mac = build_mac(secret);
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "webhook_signing_secret";
    const BODY: &[u8] = br#"{"meta":{"event_name":"subscription_created"}}"#;

    #[test]
    fn correct_signature_verifies() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = sign_body(TEST_SECRET, BODY);
        assert!(verifier.verify(&signature, BODY));
    }

    #[test]
    fn signature_header_is_case_insensitive_and_trimmed() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = sign_body(TEST_SECRET, BODY).to_uppercase();
        assert!(verifier.verify(&format!("  {} ", signature), BODY));
    }

    #[test]
    fn tampered_body_fails() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = sign_body(TEST_SECRET, BODY);
        assert!(!verifier.verify(&signature, b"tampered"));
    }

    #[test]
    fn flipped_signature_byte_fails() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let mut signature = sign_body(TEST_SECRET, BODY).into_bytes();
        signature[0] = if signature[0] == b'0' { b'1' } else { b'0' };
        assert!(!verifier.verify(std::str::from_utf8(&signature).unwrap(), BODY));
    }

    #[test]
    fn wrong_secret_fails() {
        let verifier = SignatureVerifier::new("other_secret");
        let signature = sign_body(TEST_SECRET, BODY);
        assert!(!verifier.verify(&signature, BODY));
    }

    #[test]
    fn odd_length_hex_fails_without_panicking() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert!(!verifier.verify("abc", BODY));
    }

    #[test]
    fn non_hex_signature_fails() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        assert!(!verifier.verify("zz".repeat(32).as_str(), BODY));
    }

    #[test]
    fn truncated_signature_fails_on_length_mismatch() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = sign_body(TEST_SECRET, BODY);
        assert!(!verifier.verify(&signature[..32], BODY));
    }

    #[test]
    fn empty_inputs_fail() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = sign_body(TEST_SECRET, BODY);
        assert!(!verifier.verify("", BODY));
        assert!(!verifier.verify(&signature, b""));

        let empty_secret = SignatureVerifier::new("");
        assert!(!empty_secret.verify(&signature, BODY));
    }

    #[test]
    fn repeated_verification_uses_cached_key() {
        let verifier = SignatureVerifier::new(TEST_SECRET);
        let signature = sign_body(TEST_SECRET, BODY);
        // Second call goes through the populated cache and must agree.
        assert!(verifier.verify(&signature, BODY));
        assert!(verifier.verify(&signature, BODY));
    }

    #[test]
    fn concurrent_verification_is_consistent() {
        use std::sync::Arc;

        let verifier = Arc::new(SignatureVerifier::new(TEST_SECRET));
        let signature = sign_body(TEST_SECRET, BODY);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let verifier = verifier.clone();
                let signature = signature.clone();
                std::thread::spawn(move || verifier.verify(&signature, BODY))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
