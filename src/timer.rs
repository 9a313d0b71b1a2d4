//! Fixed-period tick source with an explicit cancel handle

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// Background task that emits a tick every `period`
///
/// Dropping the timer cancels it, so a torn-down view never keeps ticking.
pub struct TickTimer {
    period: Duration,
    ticks: mpsc::Receiver<()>,
    task: Option<JoinHandle<()>>,
}

impl TickTimer {
    /// Start ticking; the first tick arrives one full period from now
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        // One slot: a slow consumer sees at most one pending tick
        let (tx, ticks) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first interval tick completes immediately
            timer.tick().await;

            loop {
                timer.tick().await;
                if tx.try_send(()).is_err() && tx.is_closed() {
                    break;
                }
            }
        });

        debug!(period_ms = period.as_millis() as u64, "tick timer started");
        Self {
            period,
            ticks,
            task: Some(task),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick; `None` once the timer is cancelled
    pub async fn tick(&mut self) -> Option<()> {
        if self.task.is_none() {
            return None;
        }
        self.ticks.recv().await
    }

    /// Stop the background task; pending ticks are discarded
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.ticks.close();
            debug!("tick timer cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
