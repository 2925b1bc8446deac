use gaugerelay_core::error::Result;

use crate::sink::GaugeSink;

/// Emits every gauge as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl GaugeSink for LogSink {
    fn submit(&self, name: &str, value: f64) -> Result<()> {
        tracing::info!(gauge = %name, value, "gauge");
        Ok(())
    }
}
