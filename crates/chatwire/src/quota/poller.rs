//! Background quota refresh.
//!
//! A [`QuotaPoller`] wakes on a fixed interval and asks its [`QuotaSource`]
//! for the current quota, publishing successful answers into the shared
//! [`QuotaStore`]. Before every request it claims its [`PollGuard`]: an
//! attempt inside the cool-down window of the previous one is skipped. Pollers
//! built with clones of the same guard therefore issue at most one request
//! per window between them, no matter how many timers are running.
//!
//! Failures never leave the poller. Each cycle yields a [`PollOutcome`] that
//! is logged at debug level and otherwise dropped; the next tick retries.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::client::{QuotaFuture, QuotaResponse, QuotaSource};
use super::state::{QuotaStore, set_quota};
use crate::config::PollerConfig;

/// Shortest tick period the poller will run with.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

// ── Guard ─────────────────────────────────────────────────────────────

/// Start time of the most recent request attempt.
///
/// Clones share the same timestamp. The timestamp is never cleared; a newer
/// attempt overwrites it, so the cool-down runs from attempt start, not from
/// response arrival.
#[derive(Clone, Debug, Default)]
pub struct PollGuard {
    last_attempt: Arc<Mutex<Option<Instant>>>,
}

impl PollGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the request slot at `now`.
    ///
    /// Returns `false` when the previous attempt started less than
    /// `cooldown` ago. Otherwise records `now` and returns `true`.
    pub fn try_claim(&self, now: Instant, cooldown: Duration) -> bool {
        let mut last = self
            .last_attempt
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = *last
            && now.saturating_duration_since(prev) < cooldown
        {
            return false;
        }
        *last = Some(now);
        true
    }

    pub fn last_attempt(&self) -> Option<Instant> {
        *self
            .last_attempt
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Poller ────────────────────────────────────────────────────────────

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The quota was fetched and stored.
    Updated(f64),
    /// Another attempt is still inside the cool-down window.
    Skipped,
    /// The backend answered with a falsy status or no quota.
    Rejected,
    /// Transport error, non-2xx status or malformed body.
    Failed(String),
}

/// Recurring, self-deduplicating quota refresh.
pub struct QuotaPoller {
    source: Arc<dyn QuotaSource>,
    store: QuotaStore,
    guard: PollGuard,
    config: PollerConfig,
}

impl QuotaPoller {
    /// A poller with its own guard. Use [`with_guard`](Self::with_guard) to
    /// share one between pollers.
    pub fn new(
        source: impl QuotaSource + 'static,
        store: QuotaStore,
        config: PollerConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            store,
            guard: PollGuard::new(),
            config,
        }
    }

    pub fn with_guard(mut self, guard: PollGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn guard(&self) -> &PollGuard {
        &self.guard
    }

    pub fn store(&self) -> &QuotaStore {
        &self.store
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Run one cycle now.
    pub async fn poll_once(&self) -> PollOutcome {
        self.poll_at(Instant::now()).await
    }

    /// Run one cycle as if the clock read `now`.
    pub async fn poll_at(&self, now: Instant) -> PollOutcome {
        if !self.guard.try_claim(now, self.config.cooldown) {
            trace!("Quota poll skipped: previous attempt inside cool-down");
            return PollOutcome::Skipped;
        }

        let outcome = match self.source.fetch().await {
            Ok(QuotaResponse {
                status: true,
                quota: Some(quota),
            }) => {
                set_quota(&self.store, quota);
                PollOutcome::Updated(quota)
            }
            Ok(_) => PollOutcome::Rejected,
            Err(e) => PollOutcome::Failed(e),
        };

        match &outcome {
            PollOutcome::Updated(quota) => debug!("Quota refreshed: {quota:.2}"),
            PollOutcome::Rejected => debug!("Quota poll rejected by backend"),
            PollOutcome::Failed(e) => debug!("Quota poll failed: {e}"),
            PollOutcome::Skipped => {}
        }
        outcome
    }

    /// Spawn the refresh loop on the current Tokio runtime.
    ///
    /// The first cycle runs one interval after start. A cycle still waiting
    /// on the network when the handle stops is abandoned.
    pub fn start(self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = self.config.interval.max(MIN_INTERVAL);

        debug!("Quota poller started: every {period:?}, url={}", self.config.base_url);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    biased;
                    _ = shutdown_rx.changed() => break,
                    _ = self.poll_once() => {}
                }
            }
            debug!("Quota poller stopped");
        });

        PollerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running poller.
///
/// Dropping the handle also ends the loop.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the loop and wait for it to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            debug!("Quota poller task ended abnormally: {e}");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
