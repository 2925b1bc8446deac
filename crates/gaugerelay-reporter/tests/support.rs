//! Shared fixtures for reporter tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use gaugerelay_core::error::{GaugeRelayError, Result};
use gaugerelay_core::naming::MetricName;
use gaugerelay_reporter::{GaugeSink, Metric};

pub const GROUP: &str = "some_dummy_value";

/// Metric handle with a settable value.
pub struct TestMetric {
    name: MetricName,
    bits: AtomicU64,
}

impl TestMetric {
    pub fn new(name: MetricName, value: f64) -> Arc<Self> {
        Arc::new(Self { name, bits: AtomicU64::new(value.to_bits()) })
    }

    pub fn named(local: &str, value: f64) -> Arc<Self> {
        Self::new(MetricName::untagged(local, GROUP).unwrap(), value)
    }

    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::SeqCst);
    }
}

impl Metric for TestMetric {
    fn metric_name(&self) -> &MetricName {
        &self.name
    }

    fn value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

pub fn handle(m: &Arc<TestMetric>) -> Arc<dyn Metric> {
    m.clone()
}

/// Records every submission in order.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(String, f64)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn total(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(n, _)| n == name).count()
    }

    pub fn last(&self, name: &str) -> Option<f64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

impl GaugeSink for RecordingSink {
    fn submit(&self, name: &str, value: f64) -> Result<()> {
        self.calls.lock().unwrap().push((name.to_string(), value));
        Ok(())
    }
}

/// Fails every other call and panics on the third.
#[derive(Default)]
pub struct FlakySink {
    calls: AtomicUsize,
}

impl FlakySink {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GaugeSink for FlakySink {
    fn submit(&self, _name: &str, _value: f64) -> Result<()> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match n % 3 {
            0 => Err(GaugeRelayError::Sink("backend unavailable".into())),
            1 => panic!("sink blew up"),
            _ => Ok(()),
        }
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    cond()
}
