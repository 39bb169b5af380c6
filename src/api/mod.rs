// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API module for AmpliFi Exporter
//!
//! Provides REST API endpoints for health checks and Prometheus metrics export.
//!
//! # Endpoints
//! - `GET /health`: health check
//! - `GET /metrics`: polls the router, then serves Prometheus metrics

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::collector::Collector;
use crate::config::Config;
use crate::metrics::MetricsRegistry;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub metrics: MetricsRegistry,
    pub collector: Collector,
}

impl AppState {
    /// Builds the state with a collector feeding `metrics`
    #[must_use]
    pub fn new(config: Config, metrics: MetricsRegistry, collector: Collector) -> Self {
        Self {
            config,
            metrics,
            collector,
        }
    }
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
