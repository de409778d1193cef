//! Data model: sample values, timestamps, and the bounded history buffer.

mod history;
mod sample;
mod variant;

pub use history::BoundedHistory;
pub use sample::{unix_timestamp, Sample};
pub use variant::Variant;
