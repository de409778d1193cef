//! vitals core: runtime-free metric primitives, snapshot formats, and errors.
//!
//! This crate defines the data model and the textual/binary snapshot contracts
//! shared by the collector and by tooling. It intentionally carries no async
//! runtime or transport dependencies so it can be embedded in any host.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `VitalsError`/`Result` so host
//! processes do not crash on malformed frames or degraded exports.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod snapshot;

/// Shared result type.
pub use error::{Result, VitalsError};
