//! Periodic task execution.
//!
//! Re-exports the scheduler and task handle so the engine and hosts can
//! depend on this module directly.

pub mod scheduler;

pub use scheduler::{Scheduler, TaskHandle};
