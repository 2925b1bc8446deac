//! Fixed-rate scheduler backed by a tokio runtime.
//!
//! A scheduler either owns a dedicated runtime (`single_worker`) or borrows a
//! host runtime through its `Handle` (`from_handle`). Only an owned runtime is
//! torn down by `shutdown`; a borrowed one just stops accepting new tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use gaugerelay_core::error::{GaugeRelayError, Result};

pub struct Scheduler {
    handle: Handle,
    runtime: Mutex<Option<Runtime>>,
    shutdown: AtomicBool,
}

impl Scheduler {
    /// Dedicated runtime with one worker thread.
    pub fn single_worker(thread_name: &str) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name(thread_name)
            .enable_time()
            .build()
            .map_err(|e| GaugeRelayError::Internal(format!("scheduler runtime build failed: {e}")))?;

        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Mutex::new(Some(runtime)),
            shutdown: AtomicBool::new(false),
        })
    }

    /// Run tasks on an existing runtime. The runtime itself is never stopped
    /// by this scheduler.
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            runtime: Mutex::new(None),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Run `task` now and then once every `period`.
    ///
    /// Ticks of one task never overlap. If a tick overruns, the next one is
    /// delayed rather than bunched.
    pub fn schedule_at_fixed_rate<F>(&self, period: Duration, task: F) -> Result<TaskHandle>
    where
        F: Fn() + Send + Sync + 'static,
    {
        if period.is_zero() {
            return Err(GaugeRelayError::InvalidArgument("period must be positive".into()));
        }
        if self.is_shutdown() {
            return Err(GaugeRelayError::SchedulerClosed);
        }

        let join = self.handle.spawn(async move {
            let mut tick = tokio::time::interval(period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                task();
            }
        });

        Ok(TaskHandle { join })
    }

    /// Stop accepting tasks; tear down the runtime if this scheduler owns one.
    /// Safe to call more than once and from any thread.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }
        let runtime = self
            .runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(rt) = runtime {
            // Does not block, so it is fine inside async contexts too.
            rt.shutdown_background();
            tracing::debug!("scheduler runtime stopped");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Whether this scheduler runs its own runtime.
    pub fn has_own_runtime(&self) -> bool {
        self.runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        // Dropping a Runtime from inside async code panics; always go through
        // the non-blocking path.
        let runtime = self
            .runtime
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(rt) = runtime {
            rt.shutdown_background();
        }
    }
}

/// Handle to one periodic task.
pub struct TaskHandle {
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Prevent further ticks. A tick that is already running completes.
    pub fn cancel(&self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
