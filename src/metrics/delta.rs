// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Delta computation for the router's resettable byte counters
//!
//! The router reports absolute byte counts that start over when it reboots. Exported
//! counters only ever grow by the value returned from [`DeltaStore::apply_delta`].

use std::collections::HashMap;

/// Which per-client counter a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Tx,
    Rx,
}

/// Last raw values seen for one client
#[derive(Debug, Clone, Copy, Default)]
struct ClientSnapshot {
    tx_bytes: Option<u64>,
    rx_bytes: Option<u64>,
}

impl ClientSnapshot {
    fn slot(&mut self, kind: CounterKind) -> &mut Option<u64> {
        match kind {
            CounterKind::Tx => &mut self.tx_bytes,
            CounterKind::Rx => &mut self.rx_bytes,
        }
    }
}

/// Previous counter values per client description
///
/// Entries are never evicted; client sets on a home router are small and stable.
#[derive(Debug, Default)]
pub struct DeltaStore {
    previous: HashMap<String, ClientSnapshot>,
}

impl DeltaStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the amount to add to the exported counter and remembers `current`
    ///
    /// - first observation: `current`
    /// - growth since last poll: `current - prior`
    /// - no growth or a reset: `current`, starting a new baseline
    pub fn apply_delta(&mut self, description: &str, kind: CounterKind, current: u64) -> u64 {
        let slot = self
            .previous
            .entry(description.to_string())
            .or_default()
            .slot(kind);

        let delta = match *slot {
            Some(prior) if current > prior => current - prior,
            Some(prior) => {
                tracing::debug!(
                    "Counter {:?} for '{}' went from {} to {}, treating as reset",
                    kind,
                    description,
                    prior,
                    current
                );
                current
            }
            None => current,
        };
        *slot = Some(current);
        delta
    }

    /// Number of client identities ever seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.previous.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_exports_raw_value() {
        let mut store = DeltaStore::new();
        assert_eq!(store.apply_delta("phone", CounterKind::Tx, 100), 100);
        assert_eq!(store.apply_delta("phone", CounterKind::Rx, 50), 50);
    }

    #[test]
    fn test_growth_exports_difference() {
        let mut store = DeltaStore::new();
        store.apply_delta("phone", CounterKind::Tx, 100);
        assert_eq!(store.apply_delta("phone", CounterKind::Tx, 150), 50);
        assert_eq!(store.apply_delta("phone", CounterKind::Tx, 151), 1);
    }

    #[test]
    fn test_reset_exports_current_then_small_delta() {
        let mut store = DeltaStore::new();
        store.apply_delta("phone", CounterKind::Tx, 100);
        assert_eq!(store.apply_delta("phone", CounterKind::Tx, 80), 80);
        assert_eq!(store.apply_delta("phone", CounterKind::Tx, 90), 10);
    }

    #[test]
    fn test_flat_counter_exports_current() {
        let mut store = DeltaStore::new();
        store.apply_delta("tv", CounterKind::Rx, 70);
        assert_eq!(store.apply_delta("tv", CounterKind::Rx, 70), 70);
    }

    #[test]
    fn test_kinds_and_clients_are_independent() {
        let mut store = DeltaStore::new();
        store.apply_delta("phone", CounterKind::Tx, 100);
        assert_eq!(store.apply_delta("phone", CounterKind::Rx, 10), 10);
        assert_eq!(store.apply_delta("laptop", CounterKind::Tx, 5), 5);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delta_matches_policy_for_value_pairs() {
        let values = [0u64, 1, 7, 100, 1_000, u64::MAX / 2, u64::MAX];
        for &prior in &values {
            for &current in &values {
                let mut store = DeltaStore::new();
                store.apply_delta("x", CounterKind::Tx, prior);
                let delta = store.apply_delta("x", CounterKind::Tx, current);
                let expected = if current > prior {
                    current - prior
                } else {
                    current
                };
                assert_eq!(delta, expected, "prior={prior} current={current}");
            }
        }
    }
}
