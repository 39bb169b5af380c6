// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update module for AmpliFi Exporter
//!
//! Contains label types, the counter delta store, and the Prometheus metrics registry.

mod delta;
mod labels;
mod registry;


/// Delta computation for resettable router counters
pub use delta::{CounterKind, DeltaStore};

/// Labels for per-client metrics
pub use labels::ClientLabels;

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
