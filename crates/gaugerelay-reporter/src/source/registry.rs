//! In-process metrics registry.
//!
//! Holds `name -> metric` and fans out add/remove notifications to every
//! registered `MetricsReporter`. Adds, removals and reporter registration are
//! serialised, so every reporter observes the same order of changes as the
//! map. Reporter failures are logged and never stop the registry from
//! notifying the others.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;

use gaugerelay_core::naming::MetricName;

use crate::source::stats::Measurable;
use crate::source::{Metric, MetricsReporter};

/// A registry-owned metric: identity plus the stat it measures.
pub struct RegisteredMetric {
    name: MetricName,
    stat: Arc<dyn Measurable>,
}

impl Metric for RegisteredMetric {
    fn metric_name(&self) -> &MetricName {
        &self.name
    }

    fn value(&self) -> f64 {
        self.stat.measure()
    }
}

/// `reporters` doubles as the registry lock: every map update and the
/// notifications it causes happen while it is held, so reporters see changes
/// in the same order the map does. Reporters must not call back into the
/// registry from their callbacks.
#[derive(Default)]
pub struct MetricsRegistry {
    metrics: DashMap<MetricName, Arc<dyn Metric>>,
    reporters: Mutex<Vec<Arc<dyn MetricsReporter>>>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            metrics: DashMap::new(),
            reporters: Mutex::new(Vec::new()),
        }
    }

    /// Register a reporter and hand it every metric that already exists.
    pub fn add_reporter(&self, reporter: Arc<dyn MetricsReporter>) {
        let mut reporters = self.lock_reporters();
        if let Err(e) = reporter.init(self.metrics()) {
            tracing::warn!(error = %e, "reporter init failed");
        }
        reporters.push(reporter);
    }

    /// Insert or replace a metric and notify reporters.
    pub fn add_metric(&self, name: MetricName, stat: Arc<dyn Measurable>) -> Arc<dyn Metric> {
        let metric: Arc<dyn Metric> = Arc::new(RegisteredMetric { name: name.clone(), stat });

        let reporters = self.lock_reporters();
        self.metrics.insert(name, Arc::clone(&metric));
        for r in reporters.iter() {
            if let Err(e) = r.metric_change(Arc::clone(&metric)) {
                tracing::warn!(metric = %metric.metric_name(), error = %e, "reporter metric_change failed");
            }
        }
        metric
    }

    /// Remove a metric and notify reporters. Returns the removed handle.
    pub fn remove_metric(&self, name: &MetricName) -> Option<Arc<dyn Metric>> {
        let reporters = self.lock_reporters();
        let (_, metric) = self.metrics.remove(name)?;
        for r in reporters.iter() {
            if let Err(e) = r.metric_removal(Arc::clone(&metric)) {
                tracing::warn!(metric = %name, error = %e, "reporter metric_removal failed");
            }
        }
        Some(metric)
    }

    pub fn metric(&self, name: &MetricName) -> Option<Arc<dyn Metric>> {
        self.metrics.get(name).map(|r| Arc::clone(r.value()))
    }

    pub fn metrics(&self) -> Vec<Arc<dyn Metric>> {
        self.metrics.iter().map(|r| Arc::clone(r.value())).collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Close every reporter and forget them.
    pub fn close(&self) {
        let reporters = std::mem::take(&mut *self.lock_reporters());
        for r in reporters {
            r.close();
        }
    }

    fn lock_reporters(&self) -> MutexGuard<'_, Vec<Arc<dyn MetricsReporter>>> {
        self.reporters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
