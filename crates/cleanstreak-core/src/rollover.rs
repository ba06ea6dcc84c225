//! Scheduled day-boundary re-evaluation.
//!
//! [`DayRollover`] owns a tokio task that fires once at the next local midnight
//! (computed from the injected [`Clock`]) and then once per period. The task is
//! cancelled by [`DayRollover::stop`] or when the handle is dropped, and a second
//! `start` while one is running is refused, so timers never stack.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::clock::{until_next_midnight, Clock};
use crate::error::SchedulerError;

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
pub struct DayRollover {
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl DayRollover {
    /// Rollover repeating every `period` after the first midnight.
    pub fn new(period: Duration) -> Result<Self, SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::ZeroPeriod);
        }
        Ok(Self { period, task: None })
    }

    /// Rollover repeating every 24 hours.
    pub fn daily() -> Self {
        Self {
            period: DAY,
            task: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Spawn the rollover task on the current tokio runtime.
    ///
    /// Returns `Ok(false)` without spawning when a task is already running.
    pub fn start<C, F>(&mut self, clock: &C, mut on_rollover: F) -> Result<bool, SchedulerError>
    where
        C: Clock + ?Sized,
        F: FnMut() + Send + 'static,
    {
        if self.is_running() {
            tracing::debug!("day rollover already running");
            return Ok(false);
        }
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;

        let first = until_next_midnight(clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        let period = self.period;
        tracing::info!(
            first_in_secs = first.as_secs(),
            period_secs = period.as_secs(),
            "day rollover scheduled"
        );

        self.task = Some(runtime.spawn(async move {
            tokio::time::sleep(first).await;
            on_rollover();

            let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                on_rollover();
            }
        }));
        Ok(true)
    }

    /// Cancel the pending task. Returns `true` if one was running.
    pub fn stop(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                let was_running = !task.is_finished();
                task.abort();
                if was_running {
                    tracing::debug!("day rollover stopped");
                }
                was_running
            }
            None => false,
        }
    }
}

impl Drop for DayRollover {
    fn drop(&mut self) {
        self.stop();
    }
}
