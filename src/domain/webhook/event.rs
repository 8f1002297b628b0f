//! Purchase webhook event types.
//!
//! Defines the structures for parsing the payment provider's event envelope.
//! Only fields relevant to granting access are captured; the rest of the
//! provider's schema is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Provider webhook envelope: `{ meta: { event_name }, data: { attributes } }`.
///
/// Ephemeral: consumed once per request, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub meta: EventMeta,
    pub data: EventData,
}

/// Envelope metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct EventMeta {
    /// Provider event name, e.g. `"subscription_created"`.
    pub event_name: String,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub attributes: EventAttributes,
}

/// The attributes this gateway consumes from a purchase event.
///
/// Everything is optional at parse time; the ingestion state machine decides
/// which absences are client errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventAttributes {
    /// Payment or subscription status reported by the provider.
    #[serde(default)]
    pub status: Option<String>,

    /// Provider product identifier, mapped to a resource id by configuration.
    #[serde(default)]
    pub product_id: Option<i64>,

    /// Payer identity.
    #[serde(default)]
    pub user_email: Option<String>,

    /// End of the current license validity window.
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,

    /// Next renewal date; used when `ends_at` is absent.
    #[serde(default)]
    pub renews_at: Option<DateTime<Utc>>,
}

impl EventAttributes {
    /// Expiry for the grant: the validity end, falling back to the renewal
    /// date for subscriptions that have no fixed end.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at.or(self.renews_at)
    }
}

/// Known provider event names that trigger a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A new subscription was created.
    SubscriptionCreated,
    /// A one-off order was created.
    OrderCreated,
    /// Anything else; ignored by this gateway.
    Unknown,
}

impl EventKind {
    /// Parse an event kind from the provider's event name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "subscription_created" => Self::SubscriptionCreated,
            "order_created" => Self::OrderCreated,
            _ => Self::Unknown,
        }
    }

    /// The provider event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated => "subscription_created",
            Self::OrderCreated => "order_created",
            Self::Unknown => "unknown",
        }
    }

    /// The status sentinel that marks this event as paid/active.
    pub fn paid_status(&self) -> &'static str {
        match self {
            Self::SubscriptionCreated => "active",
            Self::OrderCreated | Self::Unknown => "paid",
        }
    }
}

impl WebhookEvent {
    /// Parse the event name into a known kind.
    pub fn kind(&self) -> EventKind {
        EventKind::from_name(&self.meta.event_name)
    }
}
