//! Shared reload gate: the earliest instant at which the next reload may run.
//!
//! Every failure, from any resource, reserves a slot by pushing the gate
//! forward one interval past `max(gate, now)`. Because the gate is a point in
//! time rather than a delay, a quiet period lets it fall behind the clock and
//! the next isolated failure waits only one interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Spacing between reloads across all watched resources.
///
/// The upstream image scaler queues at most 50 requests with a 4 second
/// timeout (one request per 80 ms); 100 ms stays under that.
pub const RELOAD_INTERVAL: Duration = Duration::from_millis(100);

/// A reserved reload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSlot {
    /// Instant at which the reload may run (the new gate value).
    pub at: Instant,
    /// Delay from the reservation time until `at`.
    pub delay: Duration,
}

/// Forward-only gate shared by every failure observer.
///
/// The gate is stored as nanoseconds since `origin` so the read-modify-write
/// is a single compare-exchange; concurrent reservations never observe the
/// same previous value.
#[derive(Debug)]
pub struct ReloadGate {
    origin: Instant,
    interval: Duration,
    earliest_next_reload: AtomicU64,
}

impl ReloadGate {
    /// Create a gate that imposes no delay until the first reservation.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a gate whose initial value is `origin`.
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            interval: RELOAD_INTERVAL,
            earliest_next_reload: AtomicU64::new(0),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current gate value.
    pub fn earliest_next_reload(&self) -> Instant {
        self.origin + Duration::from_nanos(self.earliest_next_reload.load(Ordering::Acquire))
    }

    /// Reserve a reload slot for a failure observed now.
    pub fn reserve(&self) -> ReloadSlot {
        self.reserve_at(Instant::now())
    }

    /// Reserve a reload slot for a failure observed at `now`.
    ///
    /// Sets the gate to `max(gate, now) + interval` and returns it together
    /// with the delay from `now`. Instants before the origin count as the
    /// origin. Gate values are nanoseconds in a `u64` and saturate about 584
    /// years after the origin; callers feeding synthetic instants must stay
    /// well below that.
    pub fn reserve_at(&self, now: Instant) -> ReloadSlot {
        let now_ns = nanos(now.saturating_duration_since(self.origin));
        let step = nanos(self.interval);
        let mut current = self.earliest_next_reload.load(Ordering::Acquire);
        loop {
            let next = current.max(now_ns).saturating_add(step);
            match self.earliest_next_reload.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    return ReloadSlot {
                        at: self.origin + Duration::from_nanos(next),
                        delay: Duration::from_nanos(next - now_ns),
                    }
                }
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for ReloadGate {
    fn default() -> Self {
        Self::new()
    }
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
