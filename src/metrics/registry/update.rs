// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metric update logic for router snapshots

use crate::amplifi::RouterSnapshot;
use crate::metrics::delta::{CounterKind, DeltaStore};
use crate::metrics::labels::ClientLabels;

use super::MetricsRegistry;

impl MetricsRegistry {
    /// Update metrics from one translated status payload
    ///
    /// Byte counters advance by the delta computed in `deltas`; gauges are overwritten.
    /// Fields missing from the snapshot leave their metric (and delta baseline) as is.
    ///
    /// # Client identity
    ///
    /// Clients are keyed by description only. Two devices sharing a description feed
    /// the same series and the same delta baseline.
    #[allow(clippy::similar_names)] // rx/tx naming pattern is intentional and clear
    pub fn update_metrics(&self, snapshot: &RouterSnapshot, deltas: &mut DeltaStore) {
        for client in &snapshot.clients {
            let labels = ClientLabels::new(client.description.as_str());

            if let Some(tx) = client.tx_bytes {
                let dx = deltas.apply_delta(&client.description, CounterKind::Tx, tx);
                self.client_tx_bytes.get_or_create(&labels).inc_by(dx);
            }
            if let Some(rx) = client.rx_bytes {
                let dx = deltas.apply_delta(&client.description, CounterKind::Rx, rx);
                self.client_rx_bytes.get_or_create(&labels).inc_by(dx);
            }
            if let Some(signal) = client.signal_quality {
                self.client_signal_quality
                    .get_or_create(&labels)
                    .set(signal);
            }
            if let Some(score) = client.happiness_score {
                self.client_happiness_score
                    .get_or_create(&labels)
                    .set(score);
            }
        }

        if let Some(tx) = snapshot.global.tx_bitrate {
            self.global_tx_bitrate.set(tx);
        }
        if let Some(rx) = snapshot.global.rx_bitrate {
            self.global_rx_bitrate.set(rx);
        }

        #[allow(clippy::cast_possible_wrap)]
        self.clients_count.set(snapshot.clients.len() as i64);
    }
}
