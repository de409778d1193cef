//! Top-level facade crate for vitals.
//!
//! Re-exports the core types and the collector library so users can depend on
//! a single crate.

pub mod core {
    pub use vitals_core::*;
}

pub mod collector {
    pub use vitals_collector::*;
}
