//! Throttled automatic reloads for failed image loads.
//!
//! All watched resources share a single [`ReloadGate`]. Each failure reserves
//! the next slot (at least [`RELOAD_INTERVAL`] after the previous one, and at
//! least one interval from now) and schedules one reload of the failed
//! resource for that slot. There are no per-resource counters and no retry
//! ceiling: a resource that keeps failing keeps being retried at the shared
//! rate.

mod gate;
mod observer;
mod throttler;

pub use gate::{ReloadGate, ReloadSlot, RELOAD_INTERVAL};
pub use observer::{FailureObserver, ThrottleStats};
pub use throttler::ReloadThrottler;
