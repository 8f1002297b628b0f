//! License Gate server binary.
//!
//! Loads configuration from the environment, wires the in-memory adapters
//! into the gateway router, and serves HTTP until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use license_gate::adapters::alerts::TracingAlerts;
use license_gate::adapters::http::{gateway_router, GatewayAppState};
use license_gate::adapters::store::{InMemoryContentStore, InMemoryRecordStore};
use license_gate::application::LicenseService;
use license_gate::config::AppConfig;
use license_gate::domain::webhook::SignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let products = Arc::new(config.products.parse()?);
    info!(
        environment = ?config.server.environment,
        products = products.len(),
        enforce_signature = config.webhook.enforce_signature,
        "starting license gate"
    );

    let records = Arc::new(InMemoryRecordStore::new());
    let license = Arc::new(LicenseService::new(
        records,
        config.credentials.derivation_secret.clone(),
    ));

    let state = GatewayAppState {
        license,
        content: Arc::new(InMemoryContentStore::new()),
        alerts: Arc::new(TracingAlerts::new()),
        verifier: Arc::new(SignatureVerifier::new(&config.webhook.signing_secret)),
        products,
        enforce_signature: config.webhook.enforce_signature,
        realm: config.credentials.realm.clone(),
    };

    let app = gateway_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
