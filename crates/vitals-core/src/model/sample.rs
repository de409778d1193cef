//! Timestamped samples.

use serde::Serialize;

use crate::model::Variant;

/// One value captured at one point in time. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub value: Variant,
}

impl Sample {
    pub fn new(timestamp: i64, value: Variant) -> Self {
        Self { timestamp, value }
    }
}

/// Current wall-clock time in seconds since the Unix epoch.
/// A clock set before the epoch reads as 0.
pub fn unix_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
