//! HTTP adapters: axum handlers and routes for the two entry points.

mod repository;
mod routes;
mod webhook;

pub use repository::{handle_download, handle_metadata, handle_upload};
pub use routes::gateway_router;
pub use webhook::handle_purchase_webhook;

use std::sync::Arc;

use crate::application::LicenseService;
use crate::config::ProductMap;
use crate::domain::webhook::SignatureVerifier;
use crate::ports::{ContentStore, OperatorAlerts};

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct GatewayAppState {
    pub license: Arc<LicenseService>,
    pub content: Arc<dyn ContentStore>,
    pub alerts: Arc<dyn OperatorAlerts>,
    pub verifier: Arc<SignatureVerifier>,
    pub products: Arc<ProductMap>,
    /// Deployment policy flag; the signature header stays mandatory even
    /// when verification is off.
    pub enforce_signature: bool,
    /// Realm for WWW-Authenticate challenges.
    pub realm: String,
}
