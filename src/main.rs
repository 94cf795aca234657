use std::error::Error;

use commission_engine::api::{AppState, create_router};
use commission_engine::calculation::CommissionEngine;
use commission_engine::config::{CommissionConfig, ConfigLoader, ServerSettings};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commission_engine=info,commission_audit=info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;

    let config = match &settings.config_dir {
        Some(dir) => ConfigLoader::load(dir)?.into_config(),
        None => {
            info!("COMMISSION_CONFIG_DIR not set, using built-in rate tables");
            CommissionConfig::default()
        }
    };

    let app = create_router(AppState::new(CommissionEngine::new(config)));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    info!(address = %settings.bind_addr, "Commission service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Commission service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
