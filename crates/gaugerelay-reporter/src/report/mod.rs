//! Metric reporting: named metrics, engine options, and the scheduling engine.

pub mod engine;
pub mod named;
pub mod options;

pub use engine::MetricReportingEngine;
pub use named::NamedMetric;
pub use options::EngineOptions;
