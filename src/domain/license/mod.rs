//! Licensing domain: identities, access records, and credential derivation.

mod access_record;
mod credentials;
mod identity;

pub use access_record::{AccessLevel, AccessRecord, ResourceGrant};
pub use credentials::{
    derive_stable_secret, sha256_hex, stored_credential_hash, user_facing_password,
};
pub use identity::Identity;
