//! Metric reporting engine.
//!
//! Keeps `identity -> (named metric, periodic task)` and pushes every tracked
//! metric's current value to the sink once per period.
//!
//! Concurrency:
//! - Lifecycle hooks may be called from any thread. Replacing or removing one
//!   identity happens under that identity's `DashMap` entry lock, so an
//!   identity never has two live tasks.
//! - `closed` is a gate: hooks hold the read side, `shutdown` takes the write
//!   side. Nothing can be inserted after `shutdown` drained the map.
//! - Ticks run on the scheduler and never touch the map.
//!
//! After `shutdown`, every lifecycle hook returns `GaugeRelayError::Closed`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use gaugerelay_core::error::{GaugeRelayError, Result};
use gaugerelay_core::naming::MetricName;

use crate::report::named::NamedMetric;
use crate::report::options::EngineOptions;
use crate::schedule::{Scheduler, TaskHandle};
use crate::sink::GaugeSink;
use crate::source::{Metric, MetricsReporter};

const SCHEDULER_THREAD_NAME: &str = "gaugerelay-tick";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchedulerOwnership {
    Owned,
    Borrowed,
}

struct TrackedMetric {
    metric: Arc<NamedMetric>,
    task: TaskHandle,
}

pub struct MetricReportingEngine {
    prefix: String,
    update_interval: Duration,
    sink: Arc<dyn GaugeSink>,
    scheduler: Arc<Scheduler>,
    ownership: SchedulerOwnership,
    tracked: DashMap<MetricName, TrackedMetric>,
    closed: RwLock<bool>,
}

impl MetricReportingEngine {
    pub fn configure(options: EngineOptions) -> Result<Self> {
        if options.update_interval_ms == 0 {
            return Err(GaugeRelayError::InvalidArgument(
                "update_interval_ms must be positive".into(),
            ));
        }

        let (scheduler, ownership) = match options.scheduler {
            Some(s) => (s, SchedulerOwnership::Borrowed),
            None => (
                Arc::new(Scheduler::single_worker(SCHEDULER_THREAD_NAME)?),
                SchedulerOwnership::Owned,
            ),
        };

        tracing::debug!(
            prefix = %options.prefix,
            update_interval_ms = options.update_interval_ms,
            ?ownership,
            "metric reporting engine configured"
        );

        Ok(Self {
            prefix: options.prefix,
            update_interval: Duration::from_millis(options.update_interval_ms),
            sink: options.sink,
            scheduler,
            ownership,
            tracked: DashMap::new(),
            closed: RwLock::new(false),
        })
    }

    /// Start reporting every metric in `metrics`. Each one ticks immediately
    /// and then independently of the others.
    pub fn initialize<I>(&self, metrics: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn Metric>>,
    {
        let _open = self.gate()?;
        for m in metrics {
            self.track(m)?;
        }
        Ok(())
    }

    /// Start reporting `metric`, replacing any task already running for the
    /// same identity.
    pub fn on_metric_added(&self, metric: Arc<dyn Metric>) -> Result<()> {
        let _open = self.gate()?;
        self.track(metric)
    }

    /// Stop reporting `metric`. Unknown identities are ignored.
    pub fn on_metric_removed(&self, metric: &dyn Metric) -> Result<()> {
        let _open = self.gate()?;
        if let Some((identity, tracked)) = self.tracked.remove(metric.metric_name()) {
            tracked.task.cancel();
            tracing::debug!(metric = %identity, gauge = %tracked.metric.metric_name(), "metric untracked");
        }
        Ok(())
    }

    /// Cancel every task and forget every metric. Stops the scheduler only
    /// if this engine created it. Calling again is a no-op.
    pub fn shutdown(&self) {
        let mut closed = self.closed.write().unwrap_or_else(PoisonError::into_inner);
        if *closed {
            return;
        }
        *closed = true;

        let cancelled = self.tracked.len();
        for entry in self.tracked.iter() {
            entry.value().task.cancel();
        }
        self.tracked.clear();

        if self.ownership == SchedulerOwnership::Owned {
            self.scheduler.shutdown();
        }

        tracing::info!(cancelled, owned_scheduler = self.owns_scheduler(), "metric reporting engine shut down");
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn sink(&self) -> &Arc<dyn GaugeSink> {
        &self.sink
    }

    pub fn scheduler(&self) -> &Arc<Scheduler> {
        &self.scheduler
    }

    pub fn owns_scheduler(&self) -> bool {
        self.ownership == SchedulerOwnership::Owned
    }

    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_tracked(&self, identity: &MetricName) -> bool {
        self.tracked.contains_key(identity)
    }

    /// Gauge name currently reported for `identity`.
    pub fn gauge_name(&self, identity: &MetricName) -> Option<Arc<str>> {
        self.tracked.get(identity).map(|t| t.metric.shared_name())
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn gate(&self) -> Result<RwLockReadGuard<'_, bool>> {
        let closed = self.closed.read().unwrap_or_else(PoisonError::into_inner);
        if *closed {
            return Err(GaugeRelayError::Closed);
        }
        Ok(closed)
    }

    fn track(&self, metric: Arc<dyn Metric>) -> Result<()> {
        let named = Arc::new(NamedMetric::new(metric, &self.prefix)?);
        let identity = named.value().metric_name().clone();

        match self.tracked.entry(identity) {
            Entry::Occupied(mut e) => {
                e.get().task.cancel();
                match self.schedule(Arc::clone(&named)) {
                    Ok(task) => {
                        tracing::debug!(metric = %e.key(), gauge = %named.metric_name(), "metric task replaced");
                        e.insert(TrackedMetric { metric: named, task });
                    }
                    Err(err) => {
                        e.remove();
                        return Err(err);
                    }
                }
            }
            Entry::Vacant(e) => {
                let task = self.schedule(Arc::clone(&named))?;
                tracing::debug!(metric = %e.key(), gauge = %named.metric_name(), "metric tracked");
                e.insert(TrackedMetric { metric: named, task });
            }
        }
        Ok(())
    }

    fn schedule(&self, metric: Arc<NamedMetric>) -> Result<TaskHandle> {
        let sink = Arc::clone(&self.sink);
        self.scheduler
            .schedule_at_fixed_rate(self.update_interval, move || report(&metric, sink.as_ref()))
    }
}

impl Drop for MetricReportingEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl MetricsReporter for MetricReportingEngine {
    fn init(&self, metrics: Vec<Arc<dyn Metric>>) -> Result<()> {
        self.initialize(metrics)
    }

    fn metric_change(&self, metric: Arc<dyn Metric>) -> Result<()> {
        self.on_metric_added(metric)
    }

    fn metric_removal(&self, metric: Arc<dyn Metric>) -> Result<()> {
        self.on_metric_removed(metric.as_ref())
    }

    fn close(&self) {
        self.shutdown();
    }
}

/// One tick. Failures stay inside the tick so the schedule keeps running.
fn report(metric: &NamedMetric, sink: &dyn GaugeSink) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let value = metric.value().value();
        sink.submit(metric.metric_name(), value)
    }));

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(gauge = %metric.metric_name(), error = %e, "gauge submission failed");
        }
        Err(_) => {
            tracing::error!(gauge = %metric.metric_name(), "gauge submission panicked");
        }
    }
}
