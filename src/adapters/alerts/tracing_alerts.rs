//! Log-backed operator alerts.
//!
//! Emits alerts as error-level tracing events. Deployments that page on
//! error logs get operator visibility without a dedicated notification
//! integration.

use async_trait::async_trait;
use tracing::error;

use crate::ports::OperatorAlerts;

/// Operator alerts emitted through the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlerts;

impl TracingAlerts {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OperatorAlerts for TracingAlerts {
    async fn unmapped_product(&self, product_id: i64) {
        error!(
            product_id,
            "paid event for unmapped product; add it to the product table"
        );
    }
}
