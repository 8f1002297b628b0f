//! Webhook configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Purchase webhook configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookConfig {
    /// Signing secret shared with the payment provider
    pub signing_secret: String,

    /// Whether signature verification rejects requests.
    ///
    /// Defaults to true; the header itself is mandatory either way. Only
    /// disable this against a provider sandbox that cannot sign.
    #[serde(default = "default_enforce")]
    pub enforce_signature: bool,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.signing_secret.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK_SIGNING_SECRET"));
        }
        Ok(())
    }
}

fn default_enforce() -> bool {
    true
}
