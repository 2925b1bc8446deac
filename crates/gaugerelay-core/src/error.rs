//! Shared error type across gaugerelay crates.

use thiserror::Error;

/// Stable error codes, safe to match on from callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Contract violation by the caller or the upstream metrics source.
    InvalidArgument,
    /// Engine already shut down.
    Closed,
    /// Scheduler no longer accepts tasks.
    SchedulerClosed,
    /// Gauge sink rejected a submission.
    Sink,
    /// Configuration could not be read or failed validation.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Closed => "CLOSED",
            ErrorCode::SchedulerClosed => "SCHEDULER_CLOSED",
            ErrorCode::Sink => "SINK",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GaugeRelayError>;

/// Unified error type used by core and reporter.
#[derive(Debug, Error)]
pub enum GaugeRelayError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("reporting engine is closed")]
    Closed,
    #[error("scheduler is shut down")]
    SchedulerClosed,
    #[error("sink: {0}")]
    Sink(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GaugeRelayError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            GaugeRelayError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            GaugeRelayError::Closed => ErrorCode::Closed,
            GaugeRelayError::SchedulerClosed => ErrorCode::SchedulerClosed,
            GaugeRelayError::Sink(_) => ErrorCode::Sink,
            GaugeRelayError::Config(_) => ErrorCode::Config,
            GaugeRelayError::Internal(_) => ErrorCode::Internal,
        }
    }
}
