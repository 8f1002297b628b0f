//! Content store port.
//!
//! An opaque object store keyed by the repository path. The gateway treats it
//! as an external collaborator: raw bytes in, raw bytes plus serving metadata
//! out. The same key is used for upload and download.

use async_trait::async_trait;
use thiserror::Error;

/// A stored object with the metadata needed to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object bytes.
    pub bytes: Vec<u8>,
    /// Content type declared at upload time.
    pub content_type: String,
    /// Entity tag for conditional requests.
    pub etag: String,
}

impl StoredObject {
    /// Object size in bytes, used for the Content-Length header.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Port for the artifact content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stores an object under the given key with its declared content type.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ContentStoreError>;

    /// Fetches an object; `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, ContentStoreError>;
}

/// Errors from the content store.
#[derive(Debug, Clone, Error)]
pub enum ContentStoreError {
    /// The backing store failed or is unreachable.
    #[error("content store unavailable: {0}")]
    Unavailable(String),
}
