//! Fixed-cadence driver for the poller.

use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

use crate::constants::polling::MIN_POLL_INTERVAL;
use crate::error::AgentError;

use super::poller::Poller;

pub struct PollScheduler {
    poller: Arc<Poller>,
    interval: Duration,
}

impl PollScheduler {
    /// Intervals below one second are clamped up.
    pub fn new(poller: Arc<Poller>, interval: Duration) -> Self {
        Self {
            poller,
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the repeated poll job. The returned scheduler must be kept and
    /// shut down by the caller.
    ///
    /// Ticks that land while a cycle is still running are skipped by the
    /// poller's own guard, so cycles never overlap.
    pub async fn start(&self) -> Result<JobScheduler, AgentError> {
        let scheduler = JobScheduler::new().await?;

        let poller = self.poller.clone();
        let job = Job::new_repeated_async(self.interval, move |_uuid, _l| {
            let poller = poller.clone();

            Box::pin(async move {
                poller.tick().await;
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        info!("⏱️ [POLL] Scheduler started - polling every {:?}", self.interval);

        Ok(scheduler)
    }
}
