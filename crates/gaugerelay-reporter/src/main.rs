//! gaugerelay reporter binary.
//!
//! - Loads `gaugerelay.yaml` (or the path given as the first argument)
//! - Registers a few process-level metrics in an in-process registry
//! - Reports them on the host tokio runtime until Ctrl-C

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tracing_subscriber::{fmt, EnvFilter};

use gaugerelay_core::error::{GaugeRelayError, Result};
use gaugerelay_core::naming::MetricName;
use gaugerelay_reporter::source::{FnMeasure, Total};
use gaugerelay_reporter::{
    config, EngineOptions, GaugeBoard, GaugeSink, LogSink, MetricReportingEngine, MetricsRegistry,
    Scheduler,
};

/// Logs every gauge and keeps the latest values for the exit summary.
struct DemoSink {
    log: LogSink,
    board: Arc<GaugeBoard>,
}

impl GaugeSink for DemoSink {
    fn submit(&self, name: &str, value: f64) -> Result<()> {
        self.board.submit(name, value)?;
        self.log.submit(name, value)
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "gaugerelay-reporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "gaugerelay.yaml".into());
    let cfg = config::load_from_file(&path)?;

    let board = Arc::new(GaugeBoard::new());
    let sink = Arc::new(DemoSink { log: LogSink, board: Arc::clone(&board) });

    // Borrow the host runtime; the engine must not stop it.
    let scheduler = Arc::new(Scheduler::from_handle(Handle::current()));
    let options = EngineOptions::from_config(&cfg.reporter, sink).scheduler(scheduler);
    let engine = Arc::new(MetricReportingEngine::configure(options)?);

    let registry = MetricsRegistry::new();
    let started = Instant::now();
    registry.add_metric(
        MetricName::new("uptime-seconds", "process", [("binary", "gaugerelay-reporter")])?,
        Arc::new(FnMeasure(move || started.elapsed().as_secs_f64())),
    );
    let ticks = Arc::new(Total::default());
    registry.add_metric(MetricName::untagged("heartbeat-total", "process")?, ticks.clone());

    registry.add_reporter(engine.clone());
    tracing::info!(path = %path, tracked = engine.tracked_len(), "gaugerelay-reporter started");

    let period = Duration::from_millis(cfg.reporter.update_interval_ms);
    let heartbeat = tokio::spawn(async move {
        let mut every = tokio::time::interval(period);
        loop {
            every.tick().await;
            ticks.record(1.0);
        }
    });

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| GaugeRelayError::Internal(format!("signal handler failed: {e}")))?;

    heartbeat.abort();
    registry.close();
    tracing::info!(gauges = board.names().len(), "final gauges:\n{}", board.render());
    Ok(())
}

