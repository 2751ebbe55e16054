//! Status polling
//!
//! [`StatusPoller`] performs one status fetch at a time and publishes the
//! result into a `tokio::sync::watch` channel. A failed fetch leaves the last
//! published snapshot in place; readers never see a half-updated view.
//!
//! [`PollScheduler`] owns the poller on a background task and drives it on a
//! fixed interval. Each fetch is awaited before the next tick is taken, and
//! ticks missed while a fetch was in flight are skipped, so two fetches are
//! never in flight at once.

use std::time::Duration;

use povline_api::{ApiError, PovClient};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::PanelError;
use crate::status::StatusView;

/// Shortest interval the scheduler will run at
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of a single poll
#[derive(Debug)]
pub enum PollOutcome {
    /// A new snapshot was published
    Updated,
    /// The fetch failed; the previous snapshot (if any) is still current
    Failed(ApiError),
}

impl PollOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, PollOutcome::Updated)
    }
}

/// Counters kept across polls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls: u64,
    pub failures: u64,
    pub consecutive_failures: u32,
}

/// Fetches device status and publishes it to watchers
#[derive(Debug)]
pub struct StatusPoller {
    client: PovClient,
    sender: watch::Sender<Option<StatusView>>,
    stats: PollStats,
}

impl StatusPoller {
    pub fn new(client: PovClient) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            client,
            sender,
            stats: PollStats::default(),
        }
    }

    /// Fetch status once and publish it
    ///
    /// On failure the published snapshot is left unchanged and the error is
    /// logged at warn level.
    pub async fn poll_once(&mut self) -> PollOutcome {
        self.stats.polls += 1;

        match self.client.status().await {
            Ok(status) => {
                self.stats.consecutive_failures = 0;
                self.sender.send_replace(Some(StatusView::from(status)));
                debug!(polls = self.stats.polls, "status snapshot updated");
                PollOutcome::Updated
            }
            Err(error) => {
                self.stats.failures += 1;
                self.stats.consecutive_failures += 1;
                warn!(
                    error = %error,
                    consecutive_failures = self.stats.consecutive_failures,
                    "status poll failed, keeping previous snapshot"
                );
                PollOutcome::Failed(error)
            }
        }
    }

    /// The last published snapshot
    pub fn current(&self) -> Option<StatusView> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> StatusWatcher {
        StatusWatcher {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }
}

/// Read handle on the published status snapshot
///
/// Cloning is cheap; every clone sees the same snapshot.
#[derive(Debug, Clone)]
pub struct StatusWatcher {
    receiver: watch::Receiver<Option<StatusView>>,
}

impl StatusWatcher {
    /// The current snapshot, `None` until the first successful poll
    pub fn current(&self) -> Option<StatusView> {
        self.receiver.borrow().clone()
    }

    /// Wait until a new snapshot is published
    ///
    /// Returns [`PanelError::WatcherClosed`] once the poller is gone.
    pub async fn changed(&mut self) -> Result<(), PanelError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| PanelError::WatcherClosed)
    }

    /// Whether a snapshot was published since the last read
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }
}

/// Drives a [`StatusPoller`] on a fixed interval in a background task
#[derive(Debug)]
pub struct PollScheduler {
    task_handle: JoinHandle<StatusPoller>,
    shutdown: watch::Sender<bool>,
    interval: Duration,
}

impl PollScheduler {
    /// Start polling immediately, then every `interval`
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(poller: StatusPoller, interval: Duration) -> Self {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let (shutdown, shutdown_rx) = watch::channel(false);

        let task_handle = tokio::spawn(Self::polling_loop(poller, interval, shutdown_rx));
        info!(interval_ms = interval.as_millis() as u64, "status polling started");

        Self {
            task_handle,
            shutdown,
            interval,
        }
    }

    async fn polling_loop(
        mut poller: StatusPoller,
        interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> StatusPoller {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    poller.poll_once().await;
                }
                // Also fires when the scheduler is dropped without stop()
                _ = shutdown.changed() => break,
            }
        }

        info!(stats = ?poller.stats(), "status polling stopped");
        poller
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop polling and hand the poller back
    ///
    /// A fetch already in flight is allowed to finish first.
    pub async fn stop(self) -> Result<StatusPoller, PanelError> {
        let _ = self.shutdown.send(true);
        self.task_handle
            .await
            .map_err(|e| PanelError::PollerTask(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use povline_api::PlaybackState;

    fn client_for(server: &Server) -> PovClient {
        PovClient::new(&server.url()).unwrap()
    }

    #[tokio::test]
    async fn test_watcher_starts_empty() {
        let server = Server::new_async().await;
        let poller = StatusPoller::new(client_for(&server));
        let watcher = poller.subscribe();

        assert!(watcher.current().is_none());
        assert!(poller.current().is_none());
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_previous_snapshot() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", "/api/status")
            .with_body(r#"{"state":"playing","image":"sunset.bmp"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut poller = StatusPoller::new(client_for(&server));
        let watcher = poller.subscribe();

        assert!(poller.poll_once().await.is_updated());
        ok.assert_async().await;
        ok.remove_async().await;

        server
            .mock("GET", "/api/status")
            .with_status(500)
            .create_async()
            .await;

        let outcome = poller.poll_once().await;
        assert!(matches!(outcome, PollOutcome::Failed(ApiError::HttpStatus(500))));

        let view = watcher.current().unwrap();
        assert_eq!(view.state, PlaybackState::Playing);
        assert_eq!(view.image, "sunset.bmp");
        assert_eq!(
            poller.stats(),
            PollStats { polls: 2, failures: 1, consecutive_failures: 1 }
        );
    }

    #[tokio::test]
    async fn test_successful_poll_replaces_snapshot() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/api/status")
            .with_body(r#"{"state":"playing","column":1}"#)
            .create_async()
            .await;

        let mut poller = StatusPoller::new(client_for(&server));
        let mut watcher = poller.subscribe();
        poller.poll_once().await;
        watcher.changed().await.unwrap();
        first.remove_async().await;

        server
            .mock("GET", "/api/status")
            .with_body(r#"{"state":"paused","column":9}"#)
            .create_async()
            .await;

        poller.poll_once().await;
        assert!(watcher.has_changed());

        let view = watcher.current().unwrap();
        assert_eq!(view.state, PlaybackState::Paused);
        assert_eq!(view.column, 9);
    }

    #[tokio::test]
    async fn test_scheduler_polls_until_stopped() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/status")
            .with_body(r#"{"state":"idle"}"#)
            .expect_at_least(2)
            .create_async()
            .await;

        let poller = StatusPoller::new(client_for(&server));
        let mut watcher = poller.subscribe();
        let scheduler = PollScheduler::start(poller, Duration::from_millis(100));

        watcher.changed().await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;

        let poller = scheduler.stop().await.unwrap();
        let polls = poller.stats().polls;
        assert!(polls >= 2, "expected at least two polls, got {}", polls);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(poller.stats().polls, polls);
    }

    #[tokio::test]
    async fn test_slow_device_never_sees_overlapping_polls() {
        use std::io::Write;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        const LATENCY: Duration = Duration::from_millis(300);

        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));
        let mut server = Server::new_async().await;
        {
            let in_flight = Arc::clone(&in_flight);
            let max_in_flight = Arc::clone(&max_in_flight);
            server
                .mock("GET", "/api/status")
                .with_chunked_body(move |w| {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    max_in_flight.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(LATENCY);
                    let written = w.write_all(br#"{"state":"playing"}"#);
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    written
                })
                .create_async()
                .await;
        }

        let started = tokio::time::Instant::now();
        let scheduler = PollScheduler::start(
            StatusPoller::new(client_for(&server)),
            MIN_POLL_INTERVAL,
        );
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let poller = scheduler.stop().await.unwrap();
        let elapsed = started.elapsed();

        let polls = poller.stats().polls;
        let ceiling = (elapsed.as_millis() / LATENCY.as_millis()) as u64 + 1;
        assert!(polls >= 2, "expected at least two polls, got {}", polls);
        assert!(polls <= ceiling, "{} polls in {:?} exceeds {}", polls, elapsed, ceiling);
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(poller.stats().failures, 0);
    }

    #[tokio::test]
    async fn test_scheduler_clamps_tiny_interval() {
        let server = Server::new_async().await;
        let scheduler = PollScheduler::start(
            StatusPoller::new(client_for(&server)),
            Duration::ZERO,
        );

        assert_eq!(scheduler.interval(), MIN_POLL_INTERVAL);
        scheduler.stop().await.unwrap();
    }
}
