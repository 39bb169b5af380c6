// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update logic

mod init;
mod scrape;
mod update;

use crate::metrics::labels::ClientLabels;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::sync::Mutex;

/// Floating point gauge
pub(crate) type FloatGauge = Gauge<f64, AtomicU64>;

/// Prometheus registry plus handles to every exported metric
///
/// Constructed explicitly and handed to the collector; cloning shares the same
/// underlying metrics.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    // counters (delta-applied)
    client_tx_bytes: Family<ClientLabels, Counter>,
    client_rx_bytes: Family<ClientLabels, Counter>,
    // gauges
    client_signal_quality: Family<ClientLabels, FloatGauge>,
    client_happiness_score: Family<ClientLabels, FloatGauge>,
    global_tx_bitrate: FloatGauge,
    global_rx_bitrate: FloatGauge,
    clients_count: Gauge,
    // scrape status
    scrape_success: Counter,
    scrape_errors: Counter,
    scrape_duration_milliseconds: Gauge,
    scrape_last_success_timestamp_seconds: Gauge,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
