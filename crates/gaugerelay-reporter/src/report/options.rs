//! Engine options accepted by `MetricReportingEngine::configure`.

use std::fmt;
use std::sync::Arc;

use crate::config::{ReporterSection, DEFAULT_UPDATE_INTERVAL_MS};
use crate::schedule::Scheduler;
use crate::sink::GaugeSink;

/// Everything `MetricReportingEngine::configure` accepts.
///
/// Only the sink is required. Without a scheduler the engine builds and owns a
/// single-worker one.
#[derive(Clone)]
pub struct EngineOptions {
    pub(crate) prefix: String,
    pub(crate) update_interval_ms: u64,
    pub(crate) sink: Arc<dyn GaugeSink>,
    pub(crate) scheduler: Option<Arc<Scheduler>>,
}

impl EngineOptions {
    pub fn new(sink: Arc<dyn GaugeSink>) -> Self {
        Self {
            prefix: String::new(),
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            sink,
            scheduler: None,
        }
    }

    /// Options from a validated config section.
    pub fn from_config(section: &ReporterSection, sink: Arc<dyn GaugeSink>) -> Self {
        Self::new(sink)
            .prefix(section.prefix.clone())
            .update_interval_ms(section.update_interval_ms)
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn update_interval_ms(mut self, ms: u64) -> Self {
        self.update_interval_ms = ms;
        self
    }

    /// Run ticks on a caller-owned scheduler. The engine never shuts it down.
    pub fn scheduler(mut self, scheduler: Arc<Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("prefix", &self.prefix)
            .field("update_interval_ms", &self.update_interval_ms)
            .field("external_scheduler", &self.scheduler.is_some())
            .finish()
    }
}
