//! In-memory store adapters.
//!
//! Back the record and content store ports with process-local maps. Used in
//! tests and single-node deployments; a KV/object-store adapter replaces
//! them in production without touching the core.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::license::{AccessRecord, Identity};
use crate::ports::{
    ContentStore, ContentStoreError, RecordStore, RecordStoreError, StoredObject, Version,
    VersionedRecord,
};

/// In-memory record store with compare-and-swap semantics.
///
/// Records are kept in their persisted JSON form so the adapter exercises
/// the same serialization path a KV-backed store would, including recovering
/// from payloads that no longer deserialize.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    entries: Arc<RwLock<HashMap<String, (String, Version)>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (useful for tests).
    pub async fn record_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Insert a raw payload under an identity key, bypassing serialization.
    ///
    /// Only for tests that need to simulate corrupt stored data.
    #[doc(hidden)]
    pub async fn insert_raw(&self, key: &str, payload: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), (payload.to_string(), 1));
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load(&self, identity: &Identity) -> Result<Option<VersionedRecord>, RecordStoreError> {
        let entries = self.entries.read().await;
        let Some((payload, version)) = entries.get(identity.as_str()) else {
            return Ok(None);
        };

        match serde_json::from_str::<AccessRecord>(payload) {
            Ok(record) => Ok(Some(VersionedRecord {
                record,
                version: *version,
            })),
            Err(err) => {
                // A corrupt entry degrades to an empty record at its stored
                // version, so the next conditional write replaces it instead
                // of conflicting forever against a payload nobody can read.
                warn!(identity = %identity, error = %err, "stored record is malformed, degrading to empty record");
                Ok(Some(VersionedRecord {
                    record: AccessRecord::new(),
                    version: *version,
                }))
            }
        }
    }

    async fn store(
        &self,
        identity: &Identity,
        record: &AccessRecord,
        expected: Option<Version>,
    ) -> Result<Version, RecordStoreError> {
        let payload = serde_json::to_string(record)
            .map_err(|e| RecordStoreError::Unavailable(e.to_string()))?;

        let mut entries = self.entries.write().await;
        let current = entries.get(identity.as_str()).map(|(_, v)| *v);

        if current != expected {
            return Err(RecordStoreError::Conflict {
                identity: identity.to_string(),
            });
        }

        let next = current.unwrap_or(0) + 1;
        entries.insert(identity.as_str().to_string(), (payload, next));
        Ok(next)
    }
}

/// In-memory content store.
///
/// Entity tags are content-derived (quoted SHA-256 of the bytes), matching
/// what an object store would report.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryContentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects (useful for tests).
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ContentStoreError> {
        let etag = format!("\"{}\"", hex::encode(Sha256::digest(&bytes)));
        let object = StoredObject {
            bytes,
            content_type: content_type.to_string(),
            etag,
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, ContentStoreError> {
        Ok(self.objects.read().await.get(key).cloned())
    }
}
