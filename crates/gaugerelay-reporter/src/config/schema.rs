use serde::Deserialize;
use gaugerelay_core::error::{GaugeRelayError, Result};

/// Tick period used when none is configured.
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 5000;

const MAX_UPDATE_INTERVAL_MS: u64 = 3_600_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterConfig {
    pub version: u32,

    #[serde(default)]
    pub reporter: ReporterSection,
}

impl ReporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GaugeRelayError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.reporter.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterSection {
    #[serde(default)]
    pub prefix: String,

    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
}

impl Default for ReporterSection {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            update_interval_ms: default_update_interval_ms(),
        }
    }
}

impl ReporterSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_UPDATE_INTERVAL_MS).contains(&self.update_interval_ms) {
            return Err(GaugeRelayError::Config(format!(
                "reporter.update_interval_ms must be between 1 and {MAX_UPDATE_INTERVAL_MS}"
            )));
        }
        Ok(())
    }
}

fn default_update_interval_ms() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MS
}
