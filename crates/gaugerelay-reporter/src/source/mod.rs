//! Metric source side: the handle contract, the listener contract, and an
//! in-process registry that drives listeners.

pub mod registry;
pub mod stats;

use std::sync::Arc;

use gaugerelay_core::error::Result;
use gaugerelay_core::naming::MetricName;

pub use registry::MetricsRegistry;
pub use stats::{FnMeasure, Measurable, Total, Value};

/// A live metric handle. `value` is read on every tick, never cached.
pub trait Metric: Send + Sync {
    fn metric_name(&self) -> &MetricName;
    fn value(&self) -> f64;
}

/// Listener notified by a registry as metrics come and go.
///
/// Callbacks may arrive on any thread, concurrently with each other.
pub trait MetricsReporter: Send + Sync {
    /// Called once on registration with every metric that already exists.
    fn init(&self, metrics: Vec<Arc<dyn Metric>>) -> Result<()>;
    /// A metric was added or replaced.
    fn metric_change(&self, metric: Arc<dyn Metric>) -> Result<()>;
    /// A metric was removed.
    fn metric_removal(&self, metric: Arc<dyn Metric>) -> Result<()>;
    /// The registry is closing.
    fn close(&self);
}
