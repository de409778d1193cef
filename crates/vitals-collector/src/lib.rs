//! vitals collector library entry.
//!
//! This crate wires the metric registry, its collection scheduler, the config
//! layer, built-in host producers, and the debug HTTP surface into a cohesive
//! collector stack. It is intended to be consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod producers;
pub mod registry;
pub mod router;
