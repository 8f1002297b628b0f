//! Access record: the per-identity licensing state.
//!
//! One record exists per normalized identity. It carries the stored credential
//! digest, a coarse access level, and the set of resource grants with their
//! expiry timestamps. The record is the unit of persistence: the whole object
//! is serialized as one JSON value under the identity key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse capability independent of per-resource grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// May download artifacts.
    #[default]
    Read,
    /// May upload and download artifacts.
    Write,
    /// No repository access at all.
    None,
}

/// A time-bounded grant for a single resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGrant {
    /// Instant after which the grant no longer authorizes access.
    pub expires_at: DateTime<Utc>,
}

/// Per-identity access state.
///
/// Invariants enforced by the grant operation (not by this type):
/// - `credential_hash` is set at most once and never overwritten;
/// - a grant entry, once present, is never replaced by a later delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecord {
    /// Stored credential digest. Absent until the first grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_hash: Option<String>,

    /// Coarse capability. Defaults to read on first grant.
    #[serde(default)]
    pub access_level: AccessLevel,

    /// Resource id to grant, first-write-wins per resource.
    #[serde(default)]
    pub grants: HashMap<String, ResourceGrant>,
}

impl AccessRecord {
    /// Creates the empty record a first grant starts from.
    pub fn new() -> Self {
        Self {
            credential_hash: None,
            access_level: AccessLevel::Read,
            grants: HashMap::new(),
        }
    }

    /// Returns the grant entry for a resource, if any.
    pub fn grant_for(&self, resource_id: &str) -> Option<&ResourceGrant> {
        self.grants.get(resource_id)
    }

    /// True iff a grant exists for the resource and has not expired at `now`.
    ///
    /// Expiry is strict: a grant whose `expires_at` equals `now` is expired.
    pub fn is_authorized(&self, resource_id: &str, now: DateTime<Utc>) -> bool {
        match self.grants.get(resource_id) {
            Some(grant) => now < grant.expires_at,
            None => false,
        }
    }

    /// True unless the access level is `None`.
    pub fn has_any_access(&self) -> bool {
        self.access_level != AccessLevel::None
    }

    /// True iff the record carries write capability.
    pub fn can_write(&self) -> bool {
        self.access_level == AccessLevel::Write
    }
}

impl Default for AccessRecord {
    fn default() -> Self {
        Self::new()
    }
}
