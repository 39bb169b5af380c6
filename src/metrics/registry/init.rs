// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Registry initialization and metric registration

use crate::metrics::labels::ClientLabels;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{FloatGauge, MetricsRegistry};

impl MetricsRegistry {
    #[allow(clippy::similar_names)] // rx/tx naming pattern is intentional
    pub fn new() -> Self {
        let mut registry = Registry::default();

        // Counters are encoded with a `_total` suffix
        let client_tx_bytes = Family::<ClientLabels, Counter>::default();
        registry.register(
            "amplifi_total_tx_bytes",
            "Total transmitted bytes per client",
            client_tx_bytes.clone(),
        );
        let client_rx_bytes = Family::<ClientLabels, Counter>::default();
        registry.register(
            "amplifi_total_rx_bytes",
            "Total received bytes per client",
            client_rx_bytes.clone(),
        );

        let client_signal_quality = Family::<ClientLabels, FloatGauge>::default();
        registry.register(
            "amplifi_signal_quality",
            "Wi-Fi signal quality per client",
            client_signal_quality.clone(),
        );
        let client_happiness_score = Family::<ClientLabels, FloatGauge>::default();
        registry.register(
            "amplifi_happiness_score",
            "Happiness score per client",
            client_happiness_score.clone(),
        );

        let global_tx_bitrate = FloatGauge::default();
        registry.register(
            "amplifi_global_tx_bitrate",
            "Global transmit bitrate",
            global_tx_bitrate.clone(),
        );
        let global_rx_bitrate = FloatGauge::default();
        registry.register(
            "amplifi_global_rx_bitrate",
            "Global receive bitrate",
            global_rx_bitrate.clone(),
        );

        let clients_count = Gauge::default();
        registry.register(
            "amplifi_clients_count",
            "Number of connected clients",
            clients_count.clone(),
        );

        // Scrape status

        let scrape_success = Counter::default();
        registry.register(
            "amplifi_scrape_success",
            "Successful router polls",
            scrape_success.clone(),
        );
        let scrape_errors = Counter::default();
        registry.register(
            "amplifi_scrape_errors",
            "Failed router polls",
            scrape_errors.clone(),
        );
        let scrape_duration_milliseconds = Gauge::default();
        registry.register(
            "amplifi_scrape_duration_milliseconds",
            "Duration of the last router poll in milliseconds",
            scrape_duration_milliseconds.clone(),
        );
        let scrape_last_success_timestamp_seconds = Gauge::default();
        registry.register(
            "amplifi_scrape_last_success_timestamp_seconds",
            "Unix timestamp of the last successful router poll",
            scrape_last_success_timestamp_seconds.clone(),
        );

        Self {
            registry: Arc::new(Mutex::new(registry)),
            client_tx_bytes,
            client_rx_bytes,
            client_signal_quality,
            client_happiness_score,
            global_tx_bitrate,
            global_rx_bitrate,
            clients_count,
            scrape_success,
            scrape_errors,
            scrape_duration_milliseconds,
            scrape_last_success_timestamp_seconds,
        }
    }
}
