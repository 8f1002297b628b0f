//! Store adapters implementing the record and content store ports.

mod in_memory;

pub use in_memory::{InMemoryContentStore, InMemoryRecordStore};
