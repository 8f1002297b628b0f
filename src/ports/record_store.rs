//! Access record store port.
//!
//! The authoritative mapping from normalized identity to access record.
//!
//! # Design
//!
//! A plain get/put key-value pair is not enough: concurrent grants for
//! different resources under the same identity would race, and the later
//! write would clobber the earlier one's grant map. The port therefore
//! exposes a **conditional write** keyed by a version token. The grant
//! operation retries optimistically on version conflict, which is what makes
//! the first-write-wins invariant hold under concurrency.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::license::{AccessRecord, Identity};

/// Opaque version token for conditional writes.
pub type Version = u64;

/// A record together with the version token its write must be conditioned on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedRecord {
    pub record: AccessRecord,
    pub version: Version,
}

/// Port for the access record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads the record for an identity.
    ///
    /// Returns `None` when no record exists. A stored payload that no longer
    /// deserializes must not error: implementations return an empty record at
    /// the entry's current version, so callers see no usable state while a
    /// conditional write at that version can still replace the corrupt entry.
    async fn load(&self, identity: &Identity) -> Result<Option<VersionedRecord>, RecordStoreError>;

    /// Conditionally writes the record.
    ///
    /// `expected` is the version the caller read, or `None` to create the
    /// record only if no record exists yet. Returns the new version on
    /// success.
    ///
    /// # Errors
    ///
    /// - [`RecordStoreError::Conflict`] when the current version does not
    ///   match `expected`; callers re-read and retry.
    /// - [`RecordStoreError::Unavailable`] for store failures; surfaced to
    ///   the caller, never swallowed.
    async fn store(
        &self,
        identity: &Identity,
        record: &AccessRecord,
        expected: Option<Version>,
    ) -> Result<Version, RecordStoreError>;
}

/// Errors from the record store.
#[derive(Debug, Clone, Error)]
pub enum RecordStoreError {
    /// The conditional write lost a race; the record changed since it was read.
    #[error("version conflict for '{identity}'")]
    Conflict { identity: String },

    /// The backing store failed or is unreachable.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl RecordStoreError {
    /// True for conflicts that an optimistic retry can resolve.
    pub fn is_conflict(&self) -> bool {
        matches!(self, RecordStoreError::Conflict { .. })
    }
}
