// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Translation of the `info-async.php?do=full` payload
//!
//! The payload is a top-level JSON array whose sections are addressed by position:
//!
//! | index | content |
//! |---|---|
//! | 1 | clients: access point → radio band → network type → client → fields |
//! | 4 | ethernet ports per device, `eth-0` carrying router-wide bitrates |
//!
//! All other indices are ignored. There is no schema version upstream, so a firmware
//! that reorders the array is only noticed through missing data.

use serde_json::{Map, Value};

use crate::error::{AppError, Result, Stage};

use super::types::{ClientRecord, GlobalStats, RouterSnapshot};

/// Array position of the per-access-point client tree
pub const CLIENTS_INDEX: usize = 1;

/// Array position of the ethernet/throughput section
pub const ETHERNET_INDEX: usize = 4;

/// Network type holding router-internal pseudo clients
const INTERNAL_NETWORK: &str = "Internal network";

/// Port whose bitrates are exported as router throughput
const GLOBAL_PORT: &str = "eth-0";

const UNKNOWN_DESCRIPTION: &str = "unknown";

/// Extracts client records and global stats from the raw status JSON
///
/// # Errors
///
/// Returns a parse error if the body is not JSON or not a top-level array.
pub fn translate(raw: &str) -> Result<RouterSnapshot> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::parse(Stage::Translate, format!("invalid status JSON: {e}")))?;
    let sections = value
        .as_array()
        .ok_or_else(|| AppError::parse(Stage::Translate, "status JSON is not an array"))?;

    let clients = match sections.get(CLIENTS_INDEX).and_then(Value::as_object) {
        Some(tree) => extract_clients(tree),
        None => {
            tracing::debug!("Status JSON has no client section at index {CLIENTS_INDEX}");
            Vec::new()
        }
    };

    let global = match sections.get(ETHERNET_INDEX).and_then(Value::as_object) {
        Some(ports) => extract_global(ports),
        None => {
            tracing::debug!("Status JSON has no ethernet section at index {ETHERNET_INDEX}");
            GlobalStats::default()
        }
    };

    Ok(RouterSnapshot { clients, global })
}

fn extract_clients(access_points: &Map<String, Value>) -> Vec<ClientRecord> {
    let mut out = Vec::new();
    for bands in access_points.values().filter_map(Value::as_object) {
        for networks in bands.values().filter_map(Value::as_object) {
            for (network_type, clients) in networks {
                if network_type == INTERNAL_NETWORK {
                    continue;
                }
                let Some(clients) = clients.as_object() else {
                    continue;
                };
                out.extend(
                    clients
                        .values()
                        .filter_map(Value::as_object)
                        .map(parse_client),
                );
            }
        }
    }
    out
}

fn parse_client(fields: &Map<String, Value>) -> ClientRecord {
    let description = fields
        .get("Description")
        .and_then(Value::as_str)
        .filter(|d| !d.is_empty())
        .unwrap_or(UNKNOWN_DESCRIPTION)
        .to_string();

    ClientRecord {
        description,
        tx_bytes: fields.get("TxBytes").and_then(as_counter),
        rx_bytes: fields.get("RxBytes").and_then(as_counter),
        signal_quality: fields.get("SignalQuality").and_then(Value::as_f64),
        happiness_score: fields.get("HappinessScore").and_then(Value::as_f64),
    }
}

fn extract_global(ports: &Map<String, Value>) -> GlobalStats {
    let Some(eth0) = ports
        .values()
        .filter_map(Value::as_object)
        .find_map(|device| device.get(GLOBAL_PORT).and_then(Value::as_object))
    else {
        tracing::debug!("No {GLOBAL_PORT} entry in ethernet section");
        return GlobalStats::default();
    };

    GlobalStats {
        tx_bitrate: eth0.get("tx_bitrate").and_then(Value::as_f64),
        rx_bitrate: eth0.get("rx_bitrate").and_then(Value::as_f64),
    }
}

/// Byte counters may arrive as integers or floats; negatives are dropped
///
/// Counters are integral, so a fractional part is truncated toward zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_counter(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    })
}
