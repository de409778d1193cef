//! One named metric: a value producer plus its bounded history.

use vitals_core::model::{BoundedHistory, Sample, Variant};

type Producer = Box<dyn Fn() -> Variant + Send + Sync>;

pub(crate) struct Metric {
    producer: Producer,
    history: BoundedHistory<Sample>,
}

impl Metric {
    pub(crate) fn new<F>(producer: F, history: BoundedHistory<Sample>) -> Self
    where
        F: Fn() -> Variant + Send + Sync + 'static,
    {
        Self {
            producer: Box::new(producer),
            history,
        }
    }

    /// Sample the producer once and append the result.
    pub(crate) fn update(&mut self, timestamp: i64) {
        let value = (self.producer)();
        self.history.push(Sample::new(timestamp, value));
    }

    pub(crate) fn len(&self) -> usize {
        self.history.len()
    }

    /// Copy of the history, oldest first.
    pub(crate) fn stats(&self) -> Vec<Sample> {
        self.history.iter().cloned().collect()
    }
}
