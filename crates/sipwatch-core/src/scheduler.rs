//! Refresh scheduler: owns the current snapshot and replaces it on a fixed
//! cadence.
//!
//! ```text
//! construct ──► tick 0 (initial snapshot, no waiting)
//!    │
//!    ├─ poll(now) / async run ──► generate ─► replace cell ─► notify subscribers
//!    │                                         (one tick at a time, missed ticks skipped)
//!    └─ stop() ──► no further ticks, subscribers released
//! ```
//!
//! Two drivers share the same tick path:
//! - [`RefreshScheduler::poll`] for callers that already own an event loop
//!   (the terminal dashboard checks it every frame);
//! - [`RefreshScheduler::run`] on a tokio runtime, stopped through a
//!   [`StopHandle`].
//!
//! Time is wall-clock aligned: due times are `origin + n * interval`. A
//! caller that falls behind gets one tick, not a backlog.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::ConfigError;
use crate::generator::{DefaultGenerator, SnapshotSource};
use crate::model::Snapshot;

/// Default refresh cadence.
pub const DEFAULT_INTERVAL_MS: u64 = 5000;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Validated scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    interval: Duration,
}

impl SchedulerConfig {
    /// Config from a millisecond count; zero or negative is rejected.
    pub fn from_millis(millis: i64) -> Result<Self, ConfigError> {
        if millis <= 0 {
            return Err(ConfigError::NonPositiveInterval { millis });
        }
        Ok(Self {
            interval: Duration::from_millis(millis as u64),
        })
    }

    /// Config from a duration; anything under one nanosecond is rejected.
    pub fn from_interval(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::NonPositiveInterval { millis: 0 });
        }
        Ok(Self { interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// Token returned by [`RefreshScheduler::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Arc<Snapshot>) + Send>;

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Owns the published snapshot and the refresh timer.
///
/// Single writer: only the scheduler replaces the snapshot. Readers hold
/// `Arc<Snapshot>` handles, which stay valid (and unchanged) after a newer
/// snapshot is published.
pub struct RefreshScheduler<G = DefaultGenerator> {
    generator: G,
    interval: Duration,
    current: Arc<Snapshot>,
    ticks: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    origin: Instant,
    /// `None` once stopped.
    next_due: Option<Instant>,
}

impl<G> fmt::Debug for RefreshScheduler<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshScheduler")
            .field("interval", &self.interval)
            .field("ticks", &self.ticks)
            .field("subscribers", &self.subscribers.len())
            .field("next_due", &self.next_due)
            .finish_non_exhaustive()
    }
}

impl<G: SnapshotSource> RefreshScheduler<G> {
    /// Build the scheduler and its initial snapshot; the cadence starts now.
    pub fn new(config: SchedulerConfig, generator: G) -> Self {
        Self::start_at(config, generator, Instant::now())
    }

    /// Like [`new`](Self::new) with an explicit time origin, so the cadence
    /// can be driven by a simulated clock.
    pub fn start_at(config: SchedulerConfig, mut generator: G, origin: Instant) -> Self {
        let mut initial = generator.generate();
        initial.tick = 0;
        log::info!(
            "refresh scheduler started: interval {} ms",
            config.interval.as_millis()
        );
        Self {
            generator,
            interval: config.interval,
            current: Arc::new(initial),
            ticks: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
            origin,
            next_due: Some(origin + config.interval),
        }
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Ticks published since construction (the initial snapshot is not a tick).
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_stopped(&self) -> bool {
        self.next_due.is_none()
    }

    /// When the next tick is due, or `None` once stopped.
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Register a callback for every snapshot published from now on.
    ///
    /// Callbacks run on the scheduler's thread, in registration order, and
    /// must not block. After [`stop`](Self::stop) the registration is ignored.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Arc<Snapshot>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        if !self.is_stopped() {
            self.subscribers.push((id, Box::new(callback)));
        }
        id
    }

    /// Drop a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        let removed = self.subscribers.len() != before;
        if !removed {
            log::warn!("unsubscribe: unknown subscription {id:?}");
        }
        removed
    }

    /// Fire a tick if one is due at `now`. Returns the published tick number.
    ///
    /// At most one tick fires per call; ticks missed while the caller was
    /// away are skipped and the next due time snaps to the cadence.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        let tick = self.publish();
        self.next_due = Some(self.next_due_after(now));
        Some(tick)
    }

    /// Fire one tick immediately, outside the cadence.
    pub fn tick_now(&mut self) -> Option<u64> {
        if self.is_stopped() {
            return None;
        }
        Some(self.publish())
    }

    /// Halt all future ticks and release subscribers. Idempotent.
    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            self.subscribers.clear();
            log::info!("refresh scheduler stopped after {} ticks", self.ticks);
        }
    }

    fn publish(&mut self) -> u64 {
        self.ticks += 1;
        let mut snapshot = self.generator.generate();
        snapshot.tick = self.ticks;
        self.current = Arc::new(snapshot);
        log::debug!("tick {} published", self.ticks);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.current);
        }
        self.ticks
    }

    /// First `origin + n * interval` strictly after `now`.
    fn next_due_after(&self, now: Instant) -> Instant {
        let elapsed = now.saturating_duration_since(self.origin).as_nanos();
        let step = self.interval.as_nanos();
        let n = elapsed / step + 1;
        let offset = u64::try_from(n.saturating_mul(step)).unwrap_or(u64::MAX);
        self.origin + Duration::from_nanos(offset)
    }
}

// ---------------------------------------------------------------------------
// Async driver
// ---------------------------------------------------------------------------

/// Requests a running scheduler loop to stop. Cheap to clone and safe to
/// call from any thread (including a Ctrl-C handler).
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Receiving side of a [`StopHandle`], consumed by [`RefreshScheduler::run`].
#[derive(Debug)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

/// A connected stop handle / signal pair.
pub fn stop_pair() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx: Arc::new(tx) }, StopSignal { rx })
}

impl<G: SnapshotSource> RefreshScheduler<G> {
    /// Tick every interval on the tokio timer until `signal` fires (or every
    /// [`StopHandle`] is dropped), then stop and hand the scheduler back.
    ///
    /// The interval timer lives inside this future and is released when it
    /// returns or is dropped.
    pub async fn run(mut self, mut signal: StopSignal) -> Self {
        let start = tokio::time::Instant::now() + self.interval;
        let mut timer = tokio::time::interval_at(start, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.is_stopped() {
            if *signal.rx.borrow_and_update() {
                break;
            }
            tokio::select! {
                biased;
                changed = signal.rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = timer.tick() => {
                    self.tick_now();
                }
            }
        }

        self.stop();
        self
    }
}

/// Spawn [`RefreshScheduler::run`] on the current tokio runtime.
pub fn spawn_scheduler<G>(
    scheduler: RefreshScheduler<G>,
) -> (StopHandle, tokio::task::JoinHandle<RefreshScheduler<G>>)
where
    G: SnapshotSource + Send + 'static,
{
    let (handle, signal) = stop_pair();
    let task = tokio::spawn(scheduler.run(signal));
    (handle, task)
}
