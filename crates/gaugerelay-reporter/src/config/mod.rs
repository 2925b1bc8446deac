//! Reporter config loader (strict parsing).

pub mod schema;

use std::fs;

use gaugerelay_core::error::{GaugeRelayError, Result};

pub use schema::{ReporterConfig, ReporterSection, DEFAULT_UPDATE_INTERVAL_MS};

pub fn load_from_file(path: &str) -> Result<ReporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| GaugeRelayError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ReporterConfig> {
    let cfg: ReporterConfig = serde_yaml::from_str(s)
        .map_err(|e| GaugeRelayError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
