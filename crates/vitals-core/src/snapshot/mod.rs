//! Point-in-time registry views and their textual form.
//!
//! A snapshot is a deep copy: once taken it never changes, so it can be
//! rendered or shipped without holding any registry lock.

pub mod wire;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, VitalsError};
use crate::model::Sample;

/// Sentinel body served when a snapshot cannot be rendered as JSON.
pub const DEGRADED_SNAPSHOT_JSON: &str = "null";

/// Everything captured for one metric, oldest sample first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSnapshot {
    pub stats: Vec<Sample>,
}

/// Whole-registry view. Sorted keys keep the rendered output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrySnapshot {
    pub metrics: BTreeMap<String, MetricSnapshot>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, stats: Vec<Sample>) {
        self.metrics.insert(name.into(), MetricSnapshot { stats });
    }

    /// JSON form, or an error when any sample value has no serialized form.
    pub fn try_to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| VitalsError::Serialization(e.to_string()))
    }

    /// JSON form that never fails the caller: degraded exports render as the
    /// `null` sentinel and are reported through a warning instead.
    pub fn render_json(&self) -> String {
        match self.try_to_json() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot rendering degraded");
                DEGRADED_SNAPSHOT_JSON.to_string()
            }
        }
    }
}
