//! Credential derivation configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Credential derivation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialConfig {
    /// Process secret for deriving per-identity passwords.
    ///
    /// Rotating this invalidates every issued credential.
    pub derivation_secret: String,

    /// Realm reported in WWW-Authenticate challenges
    #[serde(default = "default_realm")]
    pub realm: String,
}

impl CredentialConfig {
    /// Validate credential configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.derivation_secret.is_empty() {
            return Err(ValidationError::MissingRequired(
                "CREDENTIALS_DERIVATION_SECRET",
            ));
        }
        Ok(())
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            derivation_secret: String::new(),
            realm: default_realm(),
        }
    }
}

fn default_realm() -> String {
    "Maven Repository".to_string()
}
