//! Error types for purchase webhook ingestion.
//!
//! Every terminal outcome of the ingestion state machine maps to exactly one
//! HTTP status, so redelivery behavior is driven entirely by the status code
//! the provider sees.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook ingestion.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The mandatory transport signature header is absent or empty.
    #[error("Missing signature")]
    MissingSignature,

    /// Signature verification failed while enforcement is on.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Body is not a parseable provider envelope.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Recognized envelope but an event this gateway does not handle.
    #[error("Unsupported event: {0}")]
    UnsupportedEvent(String),

    /// Payment or subscription status is not the provider's paid sentinel.
    #[error("Order not paid")]
    PaymentNotCompleted,

    /// No resource mapped for the product id. A configuration gap, not a
    /// user error; an operator alert accompanies this response.
    #[error("No resource mapped for product {0}")]
    UnmappedProduct(i64),

    /// Required attribute missing from an otherwise valid event.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The record store rejected or failed the grant.
    #[error("Grant failed: {0}")]
    GrantFailed(String),
}

impl WebhookError {
    /// Maps the error to the response status the provider sees.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature
            | WebhookError::InvalidPayload(_)
            | WebhookError::UnsupportedEvent(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            WebhookError::InvalidSignature => StatusCode::FORBIDDEN,

            WebhookError::PaymentNotCompleted => StatusCode::PAYMENT_REQUIRED,

            WebhookError::UnmappedProduct(_) => StatusCode::NOT_FOUND,

            WebhookError::GrantFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for errors that indicate an operator setup problem rather than a
    /// malformed or unauthorized request.
    pub fn is_configuration_gap(&self) -> bool {
        matches!(self, WebhookError::UnmappedProduct(_))
    }
}
