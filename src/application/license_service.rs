//! License service: grant, authenticate, authorize.
//!
//! The single place where the access-grant state machine lives. Both entry
//! points (webhook ingestion and the resource gateway) go through this
//! service, so expiry and credential rules are evaluated identically on both
//! paths.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::license::{
    sha256_hex, stored_credential_hash, user_facing_password, AccessRecord, Identity,
    ResourceGrant,
};
use crate::ports::{RecordStore, RecordStoreError};

/// Upper bound on optimistic retries when concurrent grants collide.
const MAX_GRANT_ATTEMPTS: usize = 4;

/// Application service for the access-grant state machine.
pub struct LicenseService {
    records: Arc<dyn RecordStore>,
    derivation_secret: String,
}

impl LicenseService {
    /// Creates the service over a record store and the credential derivation
    /// secret.
    pub fn new(records: Arc<dyn RecordStore>, derivation_secret: impl Into<String>) -> Self {
        Self {
            records,
            derivation_secret: derivation_secret.into(),
        }
    }

    /// Grants an identity time-bounded access to a resource.
    ///
    /// Read-modify-write with a conditional store:
    /// - no record yet: initialize one with read access;
    /// - `credential_hash` absent: derive and set it, exactly once per
    ///   identity;
    /// - grant for this resource absent: insert it and persist;
    /// - grant already present: no-op, nothing is persisted. Redelivered
    ///   webhooks therefore never reset or extend an existing expiry.
    ///
    /// A version conflict means another grant for the same identity won the
    /// race; the loop re-reads and merges into the winner's record.
    ///
    /// # Errors
    ///
    /// [`RecordStoreError::Unavailable`] on store failure, or the final
    /// [`RecordStoreError::Conflict`] if contention outlasts the retry bound.
    pub async fn grant(
        &self,
        identity: &Identity,
        resource_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RecordStoreError> {
        let mut last_conflict = RecordStoreError::Conflict {
            identity: identity.to_string(),
        };

        for attempt in 0..MAX_GRANT_ATTEMPTS {
            let (mut record, expected) = match self.records.load(identity).await? {
                Some(versioned) => (versioned.record, Some(versioned.version)),
                None => (AccessRecord::new(), None),
            };

            if record.grants.contains_key(resource_id) {
                debug!(
                    identity = %identity,
                    resource = resource_id,
                    "grant already present, redelivery ignored"
                );
                return Ok(());
            }

            if record.credential_hash.is_none() {
                record.credential_hash =
                    Some(stored_credential_hash(identity, &self.derivation_secret));
            }

            record
                .grants
                .insert(resource_id.to_string(), ResourceGrant { expires_at });

            match self.records.store(identity, &record, expected).await {
                Ok(_) => {
                    info!(
                        identity = %identity,
                        resource = resource_id,
                        expires_at = %expires_at,
                        "access granted"
                    );
                    return Ok(());
                }
                Err(err @ RecordStoreError::Conflict { .. }) => {
                    debug!(
                        identity = %identity,
                        resource = resource_id,
                        attempt,
                        "grant lost version race, retrying"
                    );
                    last_conflict = err;
                }
                Err(err) => return Err(err),
            }
        }

        warn!(
            identity = %identity,
            resource = resource_id,
            "grant contention outlasted retry bound"
        );
        Err(last_conflict)
    }

    /// Authenticates an identity against a supplied password.
    ///
    /// Returns the full record on success, `None` when the identity has no
    /// record, has no credential yet, or the password digest does not match.
    ///
    /// # Errors
    ///
    /// Store unavailability is surfaced, never treated as "no record".
    pub async fn authenticate(
        &self,
        identity: &Identity,
        supplied_password: &str,
    ) -> Result<Option<AccessRecord>, RecordStoreError> {
        let Some(versioned) = self.records.load(identity).await? else {
            debug!(identity = %identity, "no record for identity");
            return Ok(None);
        };

        let Some(stored) = versioned.record.credential_hash.as_deref() else {
            debug!(identity = %identity, "record has no credential");
            return Ok(None);
        };

        if sha256_hex(supplied_password) != stored {
            debug!(identity = %identity, "credential mismatch");
            return Ok(None);
        }

        Ok(Some(versioned.record))
    }

    /// True iff the record holds an unexpired grant for the resource.
    pub fn is_authorized(record: &AccessRecord, resource_id: &str) -> bool {
        record.is_authorized(resource_id, Utc::now())
    }

    /// The password a user is expected to present, for grant-issuance
    /// notifications.
    pub fn password_for(&self, identity: &Identity) -> String {
        user_facing_password(identity, &self.derivation_secret)
    }
}
