//! Identity value object.
//!
//! The identity is the email-like string the payment provider reports for the
//! payer. It is the primary key for access records, so every lookup and every
//! store operation must agree on a single canonical form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized user identity.
///
/// Construction lower-cases and trims the input, so `"User@Example.com "` and
/// `"user@example.com"` resolve to the same record key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Creates a normalized identity from a raw provider-supplied string.
    pub fn new(raw: &str) -> Self {
        Identity(raw.trim().to_lowercase())
    }

    /// Returns the canonical key form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for identities that normalized to nothing.
    ///
    /// An empty identity never matches a stored record; it is not rejected
    /// here because lookups with it are harmless.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
