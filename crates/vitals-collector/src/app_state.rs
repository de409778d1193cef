//! Shared application state for the collector's HTTP surface.

use std::sync::Arc;

use crate::config::CollectorConfig;
use crate::registry::MetricRegistry;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CollectorConfig>,
    registry: MetricRegistry,
}

impl AppState {
    pub fn new(cfg: CollectorConfig, registry: MetricRegistry) -> Self {
        Self {
            cfg: Arc::new(cfg),
            registry,
        }
    }

    pub fn cfg(&self) -> &CollectorConfig {
        &self.cfg
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }
}
