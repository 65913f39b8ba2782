//! `imgretry schedule` – show the reload slots a failure sequence gets.

use std::time::Duration;

use imgretry_core::throttle::ReloadGate;
use tokio::time::Instant;

/// Latest failure offset `schedule` accepts: one year. Keeps every gate value
/// well inside the gate's nanosecond range.
pub const MAX_FAILURE_OFFSET_MS: u64 = 365 * 24 * 60 * 60 * 1000;

/// One row of the schedule, all times in milliseconds after page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReload {
    pub failed_at: u64,
    pub reload_at: u64,
    pub delay: u64,
}

/// Run `failures` through a fresh gate in the given order.
pub fn plan(failures: &[u64]) -> Vec<ScheduledReload> {
    let t0 = Instant::now();
    let gate = ReloadGate::starting_at(t0);
    failures
        .iter()
        .map(|&failed_at| {
            let slot = gate.reserve_at(t0 + Duration::from_millis(failed_at));
            ScheduledReload {
                failed_at,
                reload_at: (slot.at - t0).as_millis() as u64,
                delay: slot.delay.as_millis() as u64,
            }
        })
        .collect()
}

pub fn run_schedule(failures: &[u64]) {
    println!("{:<8} {:>10} {:>10} {:>8}", "FAILURE", "FAILED_AT", "RELOAD_AT", "DELAY");
    for (i, row) in plan(failures).iter().enumerate() {
        println!(
            "{:<8} {:>8}ms {:>8}ms {:>6}ms",
            i + 1,
            row.failed_at,
            row.reload_at,
            row.delay
        );
    }
}
