// Polling driver
//
// Fires the evaluator once at startup and then on a fixed cadence,
// wrapping each tick in a bounded retry loop. Evaluator failures never
// escape the driver; a tick that exhausts its retries is logged and the
// next tick proceeds independently.

use crate::publish::evaluator::PublishEvaluator;
use crate::retry::{FixedDelay, RetryStrategy};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, sleep};
use tracing::{debug, error, info, instrument, warn};

/// Configuration for the polling driver
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// How often to evaluate scheduled articles (in seconds)
    pub poll_interval_seconds: u64,
    /// Attempts per tick when the evaluator fails
    pub retry_attempts: u32,
    /// Fixed delay between retry attempts (in seconds)
    pub retry_delay_seconds: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 60,
            retry_attempts: 3,
            retry_delay_seconds: 3,
        }
    }
}

/// Polling driver owning the timer and retry policy
pub struct PublishDriver {
    config: DriverConfig,
    evaluator: Arc<dyn PublishEvaluator>,
    retry: FixedDelay,
    shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

impl PublishDriver {
    pub fn new(config: DriverConfig, evaluator: Arc<dyn PublishEvaluator>) -> Self {
        let (shutdown_tx, _shutdown_rx) = tokio::sync::broadcast::channel(1);
        let retry = FixedDelay::new(
            Duration::from_secs(config.retry_delay_seconds),
            config.retry_attempts,
        );

        Self {
            config,
            evaluator,
            retry,
            shutdown_tx,
        }
    }

    /// Run the polling loop until [`PublishDriver::stop`] is called.
    ///
    /// The interval's first tick fires immediately, so scheduled articles
    /// are not left waiting a full period after process start.
    #[instrument(skip(self))]
    pub async fn start(&self) {
        info!(
            target: "scheduler",
            poll_interval_seconds = self.config.poll_interval_seconds,
            "Starting publish driver"
        );

        let mut poll_interval = interval(Duration::from_secs(self.config.poll_interval_seconds));
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    self.run_once().await;
                }
                _ = shutdown_rx.recv() => {
                    info!(target: "scheduler", "Shutdown signal received, stopping publish driver");
                    break;
                }
            }
        }

        info!(target: "scheduler", "Publish driver stopped");
    }

    /// Stop the polling loop. The in-flight tick completes before the
    /// loop exits.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// One tick: evaluate at the current wall-clock time under the retry
    /// policy. Never returns an error; exhaustion is logged and the next
    /// scheduled tick tries again on fresh state.
    #[instrument(skip(self))]
    pub async fn run_once(&self) {
        let now = Utc::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            match self.evaluator.evaluate(now).await {
                Ok(summary) => {
                    if !summary.success {
                        warn!(
                            target: "scheduler",
                            published = summary.published,
                            message = %summary.message,
                            "Publish pass completed with failures"
                        );
                    } else if summary.published > 0 {
                        info!(
                            target: "scheduler",
                            published = summary.published,
                            message = %summary.message,
                            "Publish pass completed"
                        );
                    } else {
                        debug!(target: "scheduler", "No articles due for publishing");
                    }
                    return;
                }
                Err(e) => match self.retry.next_delay(attempt) {
                    Some(delay) => {
                        warn!(
                            target: "scheduler",
                            attempt,
                            max_attempts = self.retry.max_attempts(),
                            error = %e,
                            "Publish pass failed, retrying"
                        );
                        sleep(delay).await;
                    }
                    None => {
                        error!(
                            target: "scheduler",
                            attempts = attempt,
                            error = %e,
                            "Publish pass failed permanently for this tick"
                        );
                        return;
                    }
                },
            }
        }
    }
}
