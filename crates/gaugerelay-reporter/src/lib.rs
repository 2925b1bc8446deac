//! gaugerelay reporter library entry.
//!
//! This crate wires the scheduler, sinks, metric source contracts, and the
//! reporting engine into a periodic gauge reporter. It is intended to be
//! consumed by host processes, by the binary (`main.rs`), and by integration
//! tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod report;
pub mod schedule;
pub mod sink;
pub mod source;

pub use report::{EngineOptions, MetricReportingEngine, NamedMetric};
pub use schedule::{Scheduler, TaskHandle};
pub use sink::{GaugeBoard, GaugeSink, LogSink};
pub use source::{Metric, MetricsRegistry, MetricsReporter};
