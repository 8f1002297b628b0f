//! Credential derivation.
//!
//! A user never chooses a repository password. Their password is derived
//! deterministically from their identity and a process-wide secret, so the
//! same identity always resolves to the same credential while the secret is
//! unchanged.
//!
//! Double-hash policy: the value handed to the user is
//! `sha256(derive(identity, secret))`; the value persisted in the record
//! store is `sha256` of that again. The stored digest is therefore two
//! one-way applications removed from the process secret, and the user-facing
//! credential never appears in storage.
//!
//! All functions here are pure and total. They are shared by grant issuance
//! and by the access check, which is what keeps the two entry points
//! consistent.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::identity::Identity;

/// Derives the stable per-identity secret from the process secret.
///
/// HMAC-SHA256 keyed by the process secret over the normalized identity,
/// hex encoded. Deterministic; no randomness.
pub fn derive_stable_secret(identity: &Identity, process_secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(process_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(identity.as_str().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// One-way SHA-256 digest, hex encoded.
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// The password communicated to the end user.
pub fn user_facing_password(identity: &Identity, process_secret: &str) -> String {
    sha256_hex(&derive_stable_secret(identity, process_secret))
}

/// The digest persisted in the access record.
pub fn stored_credential_hash(identity: &Identity, process_secret: &str) -> String {
    sha256_hex(&user_facing_password(identity, process_secret))
}
