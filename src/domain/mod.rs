//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `license` - Identities, access records, and credential derivation
//! - `webhook` - Provider event envelope and signature verification

pub mod license;
pub mod webhook;
