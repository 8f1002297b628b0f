//! License Gate - Purchase-Driven Resource Licensing Gateway
//!
//! This crate turns verified purchase webhooks into time-bounded access
//! records and serves a Maven-style artifact repository gated on those
//! records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
