//! Application layer.
//!
//! Orchestrates domain operations and coordinates between ports. Both HTTP
//! entry points share the [`LicenseService`] so access rules are evaluated
//! identically everywhere.

mod license_service;

pub use license_service::LicenseService;
