// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # AmpliFi Exporter
//!
//! Prometheus exporter for AmpliFi routers.
//!
//! This library logs into the router's web UI, downloads its status dump on every
//! scrape and republishes per-client traffic, signal quality and router throughput
//! as Prometheus metrics.
//!
//! ## Main modules
//! - `amplifi`: router session, token scraping and payload translation
//! - `api`: HTTP API handlers
//! - `collector`: poll orchestration
//! - `config`: configuration management
//! - `error`: error types
//! - `metrics`: delta store and Prometheus registry
//! - `prelude`: commonly used types and traits

mod amplifi;
mod api;
mod collector;
mod config;
mod error;
mod metrics;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Cli, Config};

/// Application error and result type
pub use error::{AppError, Result, Stage};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Poll orchestration
pub use collector::Collector;

/// Metrics registry, labels and delta store
pub use metrics::{ClientLabels, CounterKind, DeltaStore, MetricsRegistry};

/// Router session and status payload types
pub use amplifi::{
    CLIENTS_INDEX, ClientRecord, ETHERNET_INDEX, GlobalStats, REQUEST_TIMEOUT, RegexScraper,
    RouterSession, RouterSnapshot, TokenScraper, translate,
};
