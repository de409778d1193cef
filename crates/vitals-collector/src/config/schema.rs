use std::time::Duration;

use serde::Deserialize;
use vitals_core::error::{Result, VitalsError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub version: u32,

    #[serde(default)]
    pub collector: CollectorSection,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(VitalsError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.collector.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_retention_window_ms")]
    pub retention_window_ms: u64,

    #[serde(default = "default_host_metrics")]
    pub host_metrics: bool,
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            poll_interval_ms: default_poll_interval_ms(),
            retention_window_ms: default_retention_window_ms(),
            host_metrics: default_host_metrics(),
        }
    }
}

impl CollectorSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=3_600_000).contains(&self.poll_interval_ms) {
            return Err(VitalsError::InvalidConfig(
                "collector.poll_interval_ms must be between 10 and 3600000".into(),
            ));
        }
        if self.retention_window_ms < self.poll_interval_ms {
            return Err(VitalsError::InvalidConfig(
                "collector.retention_window_ms must be at least poll_interval_ms".into(),
            ));
        }
        Ok(())
    }

    /// Samples kept per metric: how many polls fit in the retention window.
    pub fn capacity(&self) -> usize {
        (self.retention_window_ms / self.poll_interval_ms) as usize
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:9099".into()
}
fn default_poll_interval_ms() -> u64 {
    1_000
}
fn default_retention_window_ms() -> u64 {
    120_000
}
fn default_host_metrics() -> bool {
    true
}
