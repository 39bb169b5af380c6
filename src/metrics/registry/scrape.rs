// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Scrape and registry-level bookkeeping helpers

use prometheus_client::encoding::text::encode;

use crate::error::{AppError, Result};

use super::MetricsRegistry;

impl MetricsRegistry {
    /// Encodes every registered metric in OpenMetrics text format
    ///
    /// # Errors
    ///
    /// Returns a metrics error if encoding fails.
    pub async fn encode_metrics(&self) -> Result<String> {
        let registry = self.registry.lock().await;
        let mut buffer = String::new();
        encode(&mut buffer, &registry).map_err(|e| AppError::Metrics(e.to_string()))?;
        Ok(buffer)
    }

    pub fn record_scrape_success(&self) {
        self.scrape_success.inc();
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        #[allow(clippy::cast_possible_wrap)]
        self.scrape_last_success_timestamp_seconds.set(now as i64);
    }

    pub fn record_scrape_error(&self) {
        self.scrape_errors.inc();
    }

    pub fn record_scrape_duration(&self, duration_secs: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let millis = (duration_secs * 1000.0).round() as i64;
        self.scrape_duration_milliseconds.set(millis);
    }

    /// Successful polls so far, for the health check
    #[must_use]
    pub fn scrape_success_count(&self) -> u64 {
        self.scrape_success.get()
    }

    /// Failed polls so far, for the health check
    #[must_use]
    pub fn scrape_error_count(&self) -> u64 {
        self.scrape_errors.get()
    }
}
