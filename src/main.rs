// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use std::sync::Arc;

use amplifi_exporter::{
    AppState, Collector, Config, MetricsRegistry, Result, RouterSession, create_router,
};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();

    // Missing password or bad addresses are fatal before anything starts
    let config = Config::from_args().inspect_err(|e| {
        tracing::error!("{}", e);
    })?;

    tracing::info!(
        "Starting amplifi-exporter: addr={}, router={}",
        config.server_addr,
        config.router_url
    );

    // Registry is created once and shared by the collector and the HTTP handlers
    let metrics = MetricsRegistry::new();
    let session = RouterSession::new(
        config.router_url.clone(),
        SecretString::new(config.password.expose_secret().into()),
    )?;
    let collector = Collector::new(session, metrics.clone());
    let addr = config.server_addr;
    let state = Arc::new(AppState::new(config, metrics, collector));

    // Shutdown channel for graceful stop on Ctrl+C
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("AmpliFi Exporter listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /health  - Health check");
    tracing::info!("  - GET /metrics - Poll router and export Prometheus metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

fn setup_tracing() {
    // RUST_LOG wins; default to info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
