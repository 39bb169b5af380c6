// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Poll orchestration for the AmpliFi router
//!
//! One poll runs login, token discovery, status download, translation and metric
//! updates in sequence. Polls are serialized: the session, its cached tokens and the
//! delta baselines form a single critical section.

use std::time::Instant;
use tokio::sync::Mutex;

use crate::amplifi::{RouterSession, translate};
use crate::error::Result;
use crate::metrics::{DeltaStore, MetricsRegistry};

/// State touched by a poll cycle
struct PollState {
    session: RouterSession,
    deltas: DeltaStore,
}

/// Runs poll cycles against one router and feeds the metrics registry
pub struct Collector {
    state: Mutex<PollState>,
    metrics: MetricsRegistry,
}

impl Collector {
    #[must_use]
    pub fn new(session: RouterSession, metrics: MetricsRegistry) -> Self {
        Self {
            state: Mutex::new(PollState {
                session,
                deltas: DeltaStore::new(),
            }),
            metrics,
        }
    }

    #[must_use]
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Runs one full poll cycle and returns the number of clients seen
    ///
    /// Waits for any poll already in flight. On failure the router session is reset
    /// so the next cycle starts from a fresh login; metrics updated before the
    /// failure are kept.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    pub async fn collect(&self) -> Result<usize> {
        let mut state = self.state.lock().await;
        let start = Instant::now();

        let result = Self::poll(&mut state, &self.metrics).await;
        let duration = start.elapsed().as_secs_f64();
        self.metrics.record_scrape_duration(duration);

        match result {
            Ok(clients) => {
                self.metrics.record_scrape_success();
                tracing::debug!(
                    "Polled router {} in {:.3}s: {} client(s)",
                    state.session.base_url(),
                    duration,
                    clients
                );
                Ok(clients)
            }
            Err(e) => {
                state.session.reset_auth();
                self.metrics.record_scrape_error();
                tracing::warn!(
                    "Failed to poll router {} in {:.3}s: {}",
                    state.session.base_url(),
                    duration,
                    e
                );
                Err(e)
            }
        }
    }

    async fn poll(state: &mut PollState, metrics: &MetricsRegistry) -> Result<usize> {
        state.session.ensure_session().await?;
        let token = state.session.info_token().await?;
        let raw = state.session.fetch_full_info(&token).await?;
        let snapshot = translate(&raw)?;

        metrics.update_metrics(&snapshot, &mut state.deltas);
        tracing::trace!(
            "Tracking delta baselines for {} client(s)",
            state.deltas.len()
        );
        Ok(snapshot.clients.len())
    }
}
