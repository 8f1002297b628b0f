//! Adapters implementing the outbound ports and the HTTP surface.

pub mod alerts;
pub mod http;
pub mod store;
