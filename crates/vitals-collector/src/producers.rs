//! Built-in host producers (process CPU and memory).
//!
//! CPU percentages need two reads over time to mean anything, so one
//! `System` instance is shared behind a lock and refreshed on every call
//! instead of being rebuilt per sample.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;
use sysinfo::{Pid, System};

use vitals_core::error::Result;
use vitals_core::model::Variant;

use crate::registry::MetricRegistry;

/// Stateful sampler shared by the host producers.
struct HostMetricsSource {
    sys: Mutex<System>,
    pid: Pid,
}

impl HostMetricsSource {
    fn new() -> Option<Arc<Self>> {
        let pid = sysinfo::get_current_pid().ok()?;
        Some(Arc::new(Self {
            sys: Mutex::new(System::new()),
            pid,
        }))
    }

    fn cpu_percent(&self) -> Variant {
        let mut sys = self.sys.lock();
        sys.refresh_process(self.pid);
        match sys.process(self.pid) {
            Some(proc_info) => Variant::Float(f64::from(proc_info.cpu_usage())),
            // An unavailable reading is a null sample, not an error.
            None => Variant::Structured(serde_json::Value::Null),
        }
    }

    fn memory(&self) -> Variant {
        let mut sys = self.sys.lock();
        sys.refresh_process(self.pid);
        match sys.process(self.pid) {
            Some(proc_info) => Variant::Structured(json!({
                "rss_bytes": proc_info.memory(),
                "virtual_bytes": proc_info.virtual_memory(),
            })),
            None => Variant::Structured(serde_json::Value::Null),
        }
    }
}

/// Register `host.cpu.percent` and `host.memory` on `registry`.
pub fn register_host_metrics(registry: &MetricRegistry) -> Result<()> {
    let Some(source) = HostMetricsSource::new() else {
        tracing::warn!("current pid unavailable, host metrics disabled");
        return Ok(());
    };

    let cpu = Arc::clone(&source);
    registry.register("host.cpu.percent", move || cpu.cpu_percent())?;

    let mem = Arc::clone(&source);
    registry.register("host.memory", move || mem.memory())?;

    Ok(())
}
