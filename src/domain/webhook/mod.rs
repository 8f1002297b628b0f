//! Webhook domain: provider event envelope and signature verification.

mod errors;
mod event;
mod verifier;

pub use errors::WebhookError;
pub use event::{EventAttributes, EventData, EventKind, EventMeta, WebhookEvent};
pub use verifier::{sign_body, SignatureVerifier};
