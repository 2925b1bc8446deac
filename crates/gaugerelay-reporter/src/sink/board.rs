//! In-memory gauge board.
//!
//! Keeps the latest value and a submission count per gauge name, backed by
//! `DashMap`. Values are stored as `f64` bit patterns in atomics so concurrent
//! ticks never contend on a lock once a name exists. Rendering sorts names to
//! keep the output deterministic.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use gaugerelay_core::error::Result;

use crate::sink::GaugeSink;

/// Map a dotted gauge name onto the Prometheus name charset.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == ':' { c } else { '_' })
        .collect()
}

#[derive(Default)]
struct GaugeCell {
    bits: AtomicU64,
    submissions: AtomicU64,
}

#[derive(Default)]
pub struct GaugeBoard {
    map: DashMap<String, GaugeCell>,
}

impl GaugeBoard {
    pub fn new() -> Self {
        Self { map: DashMap::new() }
    }

    /// Latest value submitted under `name`.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.map
            .get(name)
            .map(|c| f64::from_bits(c.bits.load(Ordering::Relaxed)))
    }

    /// How many times `name` was submitted.
    pub fn submissions(&self, name: &str) -> u64 {
        self.map
            .get(name)
            .map(|c| c.submissions.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Submissions across all names.
    pub fn total_submissions(&self) -> u64 {
        self.map
            .iter()
            .map(|r| r.value().submissions.load(Ordering::Relaxed))
            .sum()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for name in self.names() {
            let Some(v) = self.value(&name) else { continue };
            let prom = sanitize_name(&name);
            let _ = writeln!(out, "# TYPE {} gauge", prom);
            let _ = writeln!(out, "{} {}", prom, v);
        }
        out
    }
}

impl GaugeSink for GaugeBoard {
    fn submit(&self, name: &str, value: f64) -> Result<()> {
        let cell = self.map.entry(name.to_string()).or_default();
        cell.bits.store(value.to_bits(), Ordering::Relaxed);
        cell.submissions.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
