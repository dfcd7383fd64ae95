// Namepick Debouncer
// Holds back rapid input until it settles; at most one pending value

use std::time::{Duration, Instant};

/// Default settle delay before a pending filter runs
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    scheduled_at: Instant,
}

/// Delays a value until no newer value arrived for `delay`
///
/// Time is passed in by the caller, so the debouncer never reads the clock
/// itself.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    pending: Option<Pending<T>>,
    delay: Duration,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing anything still pending
    ///
    /// Returns true when a pending value was superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        self.pending
            .replace(Pending {
                value,
                scheduled_at: now,
            })
            .is_some()
    }

    /// Take the pending value once its delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.scheduled_at) >= self.delay);

        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Drop the pending value without firing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value fires, `None` when idle
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|p| {
            let elapsed = now.saturating_duration_since(p.scheduled_at);
            self.delay.saturating_sub(elapsed)
        })
    }
}
