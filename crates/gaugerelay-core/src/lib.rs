//! gaugerelay core: metric identity, deterministic naming, and the shared
//! error surface.
//!
//! This crate carries no runtime dependencies so the naming rules can be
//! reused by any reporter implementation (scheduled, on-demand, or test
//! harnesses) without pulling in tokio.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Contract violations from the upstream metrics source surface as
//! `GaugeRelayError::InvalidArgument` instead of crashing the host process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod naming;

/// Shared result type.
pub use error::{ErrorCode, GaugeRelayError, Result};
pub use naming::{compute_name, MetricName};
