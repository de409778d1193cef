//! Metric registry and its collection scheduler.
//!
//! One registry owns a name -> metric map and at most one background task
//! that samples every registered producer on a fixed interval. Each tick is a
//! single critical section, so snapshot readers never observe a half-applied
//! pass.

mod metric;

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use vitals_core::error::{Result, VitalsError};
use vitals_core::model::{unix_timestamp, BoundedHistory, Variant};
use vitals_core::snapshot::RegistrySnapshot;

use metric::Metric;

/// Shared handle to one registry. Clones are cheap and refer to the same state.
#[derive(Clone)]
pub struct MetricRegistry {
    inner: Arc<RegistryInner>,
}

struct RegistryInner {
    capacity: usize,
    interval: Duration,
    metrics: RwLock<HashMap<String, Metric>>,
    // Cancel sender for the currently running scheduler generation, if any.
    scheduler: Mutex<Option<mpsc::Sender<()>>>,
}

impl MetricRegistry {
    /// New registry keeping `capacity` samples per metric, sampled every
    /// `interval` once started.
    pub fn new(capacity: usize, interval: Duration) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                capacity,
                interval,
                metrics: RwLock::new(HashMap::new()),
                scheduler: Mutex::new(None),
            }),
        }
    }

    /// Register a named producer. Fails without side effects when the name is
    /// already taken. Safe to call while collection is running; the new metric
    /// joins the next tick.
    ///
    /// Producers must be cheap and non-blocking, and must not call back into
    /// this registry: collection runs them with the registry lock held.
    pub fn register<F>(&self, name: &str, producer: F) -> Result<()>
    where
        F: Fn() -> Variant + Send + Sync + 'static,
    {
        let mut metrics = self.inner.metrics.write();
        if metrics.contains_key(name) {
            return Err(VitalsError::DuplicateMetric(name.to_string()));
        }
        metrics.insert(
            name.to_string(),
            Metric::new(producer, BoundedHistory::new(self.inner.capacity)),
        );
        Ok(())
    }

    /// Start the scheduler task. A second call while running is a no-op. The
    /// first tick fires one full interval after this call. The task keeps the
    /// registry state alive until `stop()`.
    pub fn start(&self) {
        let mut slot = self.inner.scheduler.lock();
        if slot.is_some() {
            tracing::debug!("collection already running");
            return;
        }
        let (quit_tx, quit_rx) = mpsc::channel(1);
        tokio::spawn(run_scheduler(Arc::clone(&self.inner), quit_rx));
        *slot = Some(quit_tx);
        tracing::info!(
            interval_ms = self.inner.interval.as_millis() as u64,
            "collection started"
        );
    }

    /// Stop the scheduler task. Fire-and-forget: an in-flight tick still
    /// completes and the task exits at its next wake-up. Idempotent, and a
    /// later `start()` spawns a fresh generation.
    pub fn stop(&self) {
        let Some(quit_tx) = self.inner.scheduler.lock().take() else {
            return;
        };
        // The slot held the only sender, so one buffered signal always fits
        // and dropping the sender ends the channel either way.
        let _ = quit_tx.try_send(());
        tracing::info!("collection stopping");
    }

    /// Whether a scheduler task is currently active.
    pub fn is_running(&self) -> bool {
        self.inner.scheduler.lock().is_some()
    }

    /// Number of samples currently held for `name`, or `None` if no such
    /// metric is registered.
    pub fn sample_count(&self, name: &str) -> Option<usize> {
        self.inner.metrics.read().get(name).map(|m| m.len())
    }

    /// Point-in-time copy of every metric's history.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let metrics = self.inner.metrics.read();
        let mut snap = RegistrySnapshot::new();
        for (name, metric) in metrics.iter() {
            snap.insert(name.clone(), metric.stats());
        }
        snap
    }
}

async fn run_scheduler(inner: Arc<RegistryInner>, mut quit: mpsc::Receiver<()>) {
    let mut tick = interval_at(Instant::now() + inner.interval, inner.interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = quit.recv() => break,

            _ = tick.tick() => {
                collect_once(&inner);
            }
        }
    }

    tracing::debug!("collection task exited");
}

/// One collection pass: every producer sampled under a single write lock, all
/// samples of the pass sharing one timestamp.
fn collect_once(inner: &RegistryInner) {
    let timestamp = unix_timestamp();
    let mut metrics = inner.metrics.write();
    for (name, metric) in metrics.iter_mut() {
        let outcome = catch_unwind(AssertUnwindSafe(|| metric.update(timestamp)));
        if outcome.is_err() {
            tracing::warn!(metric = %name, "producer panicked, sample skipped");
        }
    }
}
