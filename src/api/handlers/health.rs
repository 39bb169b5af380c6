// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub router: String,
    pub has_successful_scrape: bool,
}

/// GET /health
///
/// Reports "unknown" before the first poll, "healthy" once any poll succeeded and
/// "degraded" (503) when polls have only failed so far.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let successes = state.metrics.scrape_success_count();
    let errors = state.metrics.scrape_error_count();

    let (status, code) = match (successes, errors) {
        (0, 0) => ("unknown", StatusCode::OK),
        (0, _) => ("degraded", StatusCode::SERVICE_UNAVAILABLE),
        _ => ("healthy", StatusCode::OK),
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        router: state.config.router_url.to_string(),
        has_successful_scrape: successes > 0,
    };

    (code, Json(response))
}
