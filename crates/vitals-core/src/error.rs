//! Shared error type across vitals crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, VitalsError>;

/// Unified error type used by core and collector.
#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("duplicate metric: {0}")]
    DuplicateMetric(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl VitalsError {
    /// Stable short code used in logs and test vectors.
    pub fn code(&self) -> &'static str {
        match self {
            VitalsError::DuplicateMetric(_) => "DUPLICATE_METRIC",
            VitalsError::Serialization(_) => "SERIALIZATION",
            VitalsError::Decode(_) => "DECODE",
            VitalsError::UnsupportedVersion(_) => "UNSUPPORTED_VERSION",
            VitalsError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
