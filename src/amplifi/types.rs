// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Type definitions for AmpliFi status data

/// One connected device, as reported by the router
///
/// `description` is the identity used across polls. Numeric fields the router
/// did not report are `None` and leave the matching metric untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub description: String,
    pub tx_bytes: Option<u64>,
    pub rx_bytes: Option<u64>,
    pub signal_quality: Option<f64>,
    pub happiness_score: Option<f64>,
}

/// Router-wide throughput from the `eth-0` port
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalStats {
    pub tx_bitrate: Option<f64>,
    pub rx_bitrate: Option<f64>,
}

/// Everything extracted from one status payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouterSnapshot {
    pub clients: Vec<ClientRecord>,
    pub global: GlobalStats,
}
