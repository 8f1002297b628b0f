//! Axum router configuration for the licensing gateway.

use axum::{
    routing::{post, put},
    Router,
};

use super::repository::{handle_download, handle_metadata, handle_upload};
use super::webhook::handle_purchase_webhook;
use super::GatewayAppState;

/// Create the gateway router.
///
/// # Routes
///
/// ## Webhook Ingestion
/// - `POST /webhooks/purchase` - Ingest a provider purchase event
///
/// ## Resource Repository
/// - `PUT /maven/*path` - Upload an artifact (requires write access)
/// - `GET /maven/*path` - Download an artifact (requires any access)
/// - `HEAD /maven/*path` - Reserved, responds 501
pub fn gateway_router(state: GatewayAppState) -> Router {
    Router::new()
        .route("/webhooks/purchase", post(handle_purchase_webhook))
        .route(
            "/maven/*path",
            put(handle_upload)
                .get(handle_download)
                .head(handle_metadata),
        )
        .with_state(state)
}
