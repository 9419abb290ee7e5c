//! inflow-server: HTTP API in front of the provider clients.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use inflow_providers::ProviderSet;

pub use config::{Config, config_path, init_config, load_config, save_config};
pub use routes::{AppState, build_router};

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config) -> Result<()> {
    let state = Arc::new(AppState {
        providers: ProviderSet::new(config.provider_settings()),
        default_days: config.server.default_days,
    });
    let app = build_router(state, &config.server.frontend_origin);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
