//! Gauge sinks: where reported `{name, value}` pairs go.

pub mod board;
pub mod log;

use gaugerelay_core::error::Result;

pub use board::GaugeBoard;
pub use log::LogSink;

/// Destination for gauge values. Called from scheduler threads.
///
/// Errors are logged by the caller and never retried.
pub trait GaugeSink: Send + Sync {
    fn submit(&self, name: &str, value: f64) -> Result<()>;
}
