// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use amplifi_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::Config;
pub use crate::error::{AppError, Result, Stage};

// Metrics types
pub use crate::metrics::{ClientLabels, CounterKind, DeltaStore, MetricsRegistry};

// AmpliFi client
pub use crate::amplifi::{
    ClientRecord, GlobalStats, RouterSession, RouterSnapshot, TokenScraper, translate,
};
pub use crate::collector::Collector;
