//! `NamedMetric`: a live metric handle plus its once-computed gauge name.

use std::fmt;
use std::sync::Arc;

use gaugerelay_core::error::Result;
use gaugerelay_core::naming::compute_name;

use crate::source::Metric;

/// A live metric handle paired with its external gauge name.
///
/// The name is computed once here and handed out by reference afterwards.
pub struct NamedMetric {
    value: Arc<dyn Metric>,
    name: Arc<str>,
}

impl NamedMetric {
    pub fn new(value: Arc<dyn Metric>, prefix: &str) -> Result<Self> {
        let name = compute_name(prefix, value.metric_name())?;
        Ok(Self {
            value,
            name: Arc::from(name),
        })
    }

    /// The same handle passed to `new`.
    pub fn value(&self) -> &Arc<dyn Metric> {
        &self.value
    }

    pub fn metric_name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }
}

impl fmt::Debug for NamedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedMetric")
            .field("identity", self.value.metric_name())
            .field("name", &self.name)
            .finish()
    }
}
