//! Failure observer: turns one failed load into one scheduled reload.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use tokio::runtime::Handle;

use crate::resource::{ResourceHandle, ResourceId};

use super::gate::{ReloadGate, ReloadSlot};

/// Counters shared by all observers of one throttler.
#[derive(Debug, Default)]
pub struct ThrottleStats {
    scheduled: AtomicU64,
    fired: AtomicU64,
    dropped: AtomicU64,
}

impl ThrottleStats {
    /// Reloads scheduled so far (one per failure).
    pub fn scheduled(&self) -> u64 {
        self.scheduled.load(Ordering::Relaxed)
    }

    /// Scheduled reloads whose timer has fired and reached a live resource.
    pub fn fired(&self) -> u64 {
        self.fired.load(Ordering::Relaxed)
    }

    /// Scheduled reloads discarded because the resource was gone when the timer fired.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Scheduled reloads whose timer has not fired yet.
    pub fn pending(&self) -> u64 {
        self.scheduled()
            .saturating_sub(self.fired())
            .saturating_sub(self.dropped())
    }
}

/// Handed to a resource on subscription; the resource calls [`notify`](Self::notify)
/// on every failed load.
///
/// Holds the resource weakly so a resource storing its own observer does not
/// keep itself alive.
#[derive(Clone)]
pub struct FailureObserver {
    id: ResourceId,
    resource: Weak<dyn ResourceHandle>,
    gate: Arc<ReloadGate>,
    stats: Arc<ThrottleStats>,
    runtime: Handle,
}

impl FailureObserver {
    pub(super) fn new(
        resource: &Arc<dyn ResourceHandle>,
        gate: Arc<ReloadGate>,
        stats: Arc<ThrottleStats>,
        runtime: Handle,
    ) -> Self {
        Self {
            id: resource.id(),
            resource: Arc::downgrade(resource),
            gate,
            stats,
            runtime,
        }
    }

    pub fn resource_id(&self) -> ResourceId {
        self.id
    }

    /// Record a failed load: reserve a gate slot and schedule exactly one reload.
    ///
    /// Safe to call from any thread; the reload runs on the throttler's runtime.
    pub fn notify(&self) -> ReloadSlot {
        let slot = self.gate.reserve();
        self.stats.scheduled.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            resource = %self.id,
            delay_ms = slot.delay.as_millis() as u64,
            "load failed, reload scheduled"
        );

        let id = self.id;
        let resource = Weak::clone(&self.resource);
        let stats = Arc::clone(&self.stats);
        self.runtime.spawn(async move {
            tokio::time::sleep_until(slot.at).await;
            match resource.upgrade() {
                Some(resource) => {
                    stats.fired.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!(resource = %id, "reloading");
                    resource.reload();
                }
                None => {
                    stats.dropped.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!(resource = %id, "resource gone, reload discarded");
                }
            }
        });
        slot
    }
}

impl std::fmt::Debug for FailureObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailureObserver")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
