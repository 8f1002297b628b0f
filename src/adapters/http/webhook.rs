//! HTTP handler for purchase webhook ingestion.
//!
//! Implements the ingestion state machine: signature, envelope, event
//! dispatch, status gate, product mapping, grant. Every terminal outcome is
//! a response; nothing propagates past the handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

use crate::domain::license::Identity;
use crate::domain::webhook::{EventAttributes, EventKind, WebhookError, WebhookEvent};

use super::GatewayAppState;

/// POST /webhooks/purchase - ingest a provider purchase event
pub async fn handle_purchase_webhook(
    State(state): State<GatewayAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, WebhookApiError> {
    // The signature header is mandatory even when verification is disabled
    // by policy, so a misconfigured provider is caught early.
    let signature = headers
        .get("X-Signature")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .ok_or(WebhookError::MissingSignature)?;

    if state.enforce_signature && !state.verifier.verify(signature, &body) {
        warn!("webhook signature rejected");
        return Err(WebhookError::InvalidSignature.into());
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

    match event.kind() {
        EventKind::Unknown => {
            info!(event = %event.meta.event_name, "ignoring unsupported event");
            Err(WebhookError::UnsupportedEvent(event.meta.event_name).into())
        }
        kind => handle_purchase(kind, &event.data.attributes, &state).await,
    }
}

/// Common handling for both paid event kinds.
async fn handle_purchase(
    kind: EventKind,
    attributes: &EventAttributes,
    state: &GatewayAppState,
) -> Result<StatusCode, WebhookApiError> {
    if attributes.status.as_deref() != Some(kind.paid_status()) {
        return Err(WebhookError::PaymentNotCompleted.into());
    }

    let product_id = attributes
        .product_id
        .ok_or(WebhookError::MissingField("product_id"))?;

    let Some(resource) = state.products.resource_for(product_id) else {
        state.alerts.unmapped_product(product_id).await;
        return Err(WebhookError::UnmappedProduct(product_id).into());
    };

    let email = attributes
        .user_email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .ok_or(WebhookError::MissingField("user_email"))?;

    let expires_at = attributes
        .expires_at()
        .ok_or(WebhookError::MissingField("ends_at"))?;

    let identity = Identity::new(email);
    state
        .license
        .grant(&identity, resource, expires_at)
        .await
        .map_err(|e| WebhookError::GrantFailed(e.to_string()))?;

    info!(
        identity = %identity,
        resource,
        event = kind.as_str(),
        "webhook accepted"
    );

    // Empty body on success.
    Ok(StatusCode::OK)
}

/// API error wrapper converting webhook errors to HTTP responses.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        (self.0.status_code(), self.0.to_string()).into_response()
    }
}
