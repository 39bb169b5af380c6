// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! AmpliFi web UI client module
//!
//! Logs into the router's web interface, downloads the status dump and turns it into
//! typed client and throughput records.

mod fetch;
mod scrape;
mod session;
mod translate;
mod types;

// Re-export public types and functions
pub use scrape::{RegexScraper, TokenScraper};
pub use session::{REQUEST_TIMEOUT, RouterSession};
pub use translate::{CLIENTS_INDEX, ETHERNET_INDEX, translate};
pub use types::{ClientRecord, GlobalStats, RouterSnapshot};
