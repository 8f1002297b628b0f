//! Operator alerting port.
//!
//! Some webhook failures are setup errors, not user errors. Those must reach
//! an operator instead of disappearing into a 4xx response. The port keeps
//! the notification channel (chat, email, pager) out of the core.

use async_trait::async_trait;

/// Port for operator-visible alerts.
///
/// Implementations are best-effort: alerting must never fail the request
/// that triggered it, so the methods are infallible from the caller's side.
#[async_trait]
pub trait OperatorAlerts: Send + Sync {
    /// A paid event arrived for a product with no resource mapping.
    ///
    /// The request is rejected either way; this exists so unmapped products
    /// are never silently dropped in production.
    async fn unmapped_product(&self, product_id: i64);
}
