// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Label types for Prometheus metrics

use prometheus_client::encoding::EncodeLabelSet;

/// Per-client label set; `host` carries the router-assigned description
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ClientLabels {
    pub host: String,
}

impl ClientLabels {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
        }
    }
}
