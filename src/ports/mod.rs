//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RecordStore` - Access record persistence with conditional writes
//! - `ContentStore` - Opaque artifact storage keyed by repository path
//! - `OperatorAlerts` - Operator-visible alerting for configuration gaps

mod alerts;
mod content_store;
mod record_store;

pub use alerts::OperatorAlerts;
pub use content_store::{ContentStore, ContentStoreError, StoredObject};
pub use record_store::{RecordStore, RecordStoreError, Version, VersionedRecord};
