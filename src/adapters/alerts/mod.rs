//! Alert adapters implementing the operator alerts port.

mod tracing_alerts;

pub use tracing_alerts::TracingAlerts;
