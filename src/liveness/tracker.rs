//! Liveness tracker
//!
//! Two states: `Unreachable` (initial) and `Alive`.
//! - `mark_alive` is the only way into `Alive`; it is called on every
//!   authenticated poll.
//! - `expiry_check` is the only way back to `Unreachable`; it fires when the
//!   last poll is older than the configured expiry.
//!
//! Both mutations run under one lock guarding `last_seen`, and `alive` is only
//! written while that lock is held. Readers load `alive` atomically and never
//! take the lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Alive,
    Unreachable,
}

#[derive(Debug)]
pub struct LivenessTracker {
    alive: AtomicBool,
    last_seen: Mutex<Option<Instant>>,
    expiry: Duration,
}

impl LivenessTracker {
    pub fn new(expiry: Duration) -> Self {
        Self {
            alive: AtomicBool::new(false),
            last_seen: Mutex::new(None),
            expiry,
        }
    }

    pub fn from_minutes(expiry_minutes: u64) -> Self {
        Self::new(Duration::from_secs(expiry_minutes.saturating_mul(60)))
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Records a poll from the consumer.
    pub fn mark_alive(&self) {
        self.mark_alive_at(Instant::now());
    }

    /// Records a poll observed at `now`. Returns `true` when this call moved
    /// the tracker from `Unreachable` to `Alive`.
    pub fn mark_alive_at(&self, now: Instant) -> bool {
        let mut last_seen = self.last_seen.lock();
        *last_seen = Some(now);
        let was_alive = self.alive.swap(true, Ordering::AcqRel);
        if !was_alive {
            debug!("internal connection established");
        }
        !was_alive
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn is_not_alive(&self) -> bool {
        !self.is_alive()
    }

    pub fn state(&self) -> Reachability {
        if self.is_alive() {
            Reachability::Alive
        } else {
            Reachability::Unreachable
        }
    }

    /// Periodic check run by the expiry monitor.
    pub fn expiry_check(&self) {
        self.expiry_check_at(Instant::now());
    }

    /// Evaluates expiry as of `now`. Returns `true` when this call moved the
    /// tracker from `Alive` to `Unreachable`.
    pub fn expiry_check_at(&self, now: Instant) -> bool {
        let last_seen = self.last_seen.lock();
        if !self.alive.load(Ordering::Acquire) {
            return false;
        }

        let stale = match *last_seen {
            Some(seen) => now.saturating_duration_since(seen) > self.expiry,
            None => true,
        };
        if stale {
            self.alive.store(false, Ordering::Release);
            debug!("internal connection lost");
        }
        stale
    }

    /// Time of the last poll, if the consumer has ever polled.
    pub fn last_seen(&self) -> Option<Instant> {
        *self.last_seen.lock()
    }
}
