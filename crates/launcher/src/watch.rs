//! Completion polling for queued builds.
//!
//! Polls on a fixed two-step schedule: one delay before the first poll,
//! then a constant interval. No backoff, and a failed poll ends the watch.

use queuebuild_core::error::LaunchError;
use queuebuild_core::{BuildServer, QueueResponse};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// When to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub initial_delay: Duration,
    pub interval: Duration,
    /// 0 = poll until completed or cancelled.
    pub max_polls: u32,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            initial_delay: Duration::ZERO,
            interval: Duration::from_secs(60),
            max_polls: 0,
        }
    }
}

impl PollSchedule {
    /// Delay before poll number `index` (0-based).
    pub fn delay_before(&self, index: u32) -> Duration {
        if index == 0 { self.initial_delay } else { self.interval }
    }
}

/// Waits for queued builds to complete.
pub struct BuildWatcher {
    server: Arc<dyn BuildServer>,
    schedule: PollSchedule,
}

impl BuildWatcher {
    pub fn new(server: Arc<dyn BuildServer>, schedule: PollSchedule) -> Self {
        Self { server, schedule }
    }

    pub fn schedule(&self) -> PollSchedule {
        self.schedule
    }

    /// Poll until the build completes.
    pub async fn watch(
        &self,
        build_id: u64,
        cancel: &CancellationToken,
    ) -> Result<QueueResponse, LaunchError> {
        self.watch_with(build_id, cancel, |_| {}).await
    }

    /// Poll until the build completes, reporting every record fetched.
    pub async fn watch_with<F>(
        &self,
        build_id: u64,
        cancel: &CancellationToken,
        mut on_poll: F,
    ) -> Result<QueueResponse, LaunchError>
    where
        F: FnMut(&QueueResponse),
    {
        info!(build_id, server = %self.server.name(), "Watching build");
        let mut polls = 0u32;

        loop {
            if self.schedule.max_polls > 0 && polls >= self.schedule.max_polls {
                return Err(LaunchError::WatchExhausted { build_id, polls });
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LaunchError::Cancelled),
                _ = tokio::time::sleep(self.schedule.delay_before(polls)) => {}
            }

            polls += 1;
            let record = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LaunchError::Cancelled),
                result = self.server.get_build(build_id) => result?,
            };

            let Some(record) = record else {
                debug!(build_id, poll = polls, "Empty build record");
                continue;
            };

            debug!(build_id, poll = polls, status = ?record.status, "Polled build");
            on_poll(&record);

            if record.is_completed() {
                info!(build_id, polls, result = ?record.result, "Build completed");
                return Ok(record);
            }
        }
    }
}
