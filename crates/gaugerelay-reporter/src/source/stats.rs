//! Minimal measurable stats for the in-process registry.
//!
//! Values are stored as `f64` bit patterns in atomics so recording never
//! takes a lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Something a registry metric can read a value from.
pub trait Measurable: Send + Sync {
    fn measure(&self) -> f64;
}

/// Running sum of recorded values.
#[derive(Debug)]
pub struct Total {
    bits: AtomicU64,
}

impl Total {
    pub fn new(initial: f64) -> Self {
        Self { bits: AtomicU64::new(initial.to_bits()) }
    }

    pub fn record(&self, v: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |cur| {
                Some((f64::from_bits(cur) + v).to_bits())
            });
    }
}

impl Default for Total {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Measurable for Total {
    fn measure(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Last recorded value.
#[derive(Debug)]
pub struct Value {
    bits: AtomicU64,
}

impl Value {
    pub fn new(initial: f64) -> Self {
        Self { bits: AtomicU64::new(initial.to_bits()) }
    }

    pub fn record(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Release);
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Measurable for Value {
    fn measure(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Adapter that measures by calling a closure.
pub struct FnMeasure<F>(pub F);

impl<F> Measurable for FnMeasure<F>
where
    F: Fn() -> f64 + Send + Sync,
{
    fn measure(&self) -> f64 {
        (self.0)()
    }
}
