//! Maintenance Server
//!
//! REST API for equipment maintenance tracking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maintenance_server::{
    api,
    clock::SystemClock,
    config::AppConfig,
    repository::{Repository, SeedData},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("maintenance_server={},tower_http=debug", config.logging.level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Maintenance Server v{}", env!("CARGO_PKG_VERSION"));

    let repository = if config.store.seed_demo_data {
        let seed = SeedData::demo().context("Failed to parse demo data")?;
        tracing::info!(
            equipment = seed.equipment.len(),
            requests = seed.requests.len(),
            "Store seeded with demo data"
        );
        Repository::with_seed(seed)
    } else {
        Repository::new()
    };

    let services = Services::new(repository, config.auth.clone(), Arc::new(SystemClock));

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
