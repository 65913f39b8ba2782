//! Reload throttler: attaches failure observers that share one gate.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use anyhow::{Context, Result};
use tokio::runtime::Handle;

use crate::resource::{ResourceHandle, ResourceId};

use super::gate::ReloadGate;
use super::observer::{FailureObserver, ThrottleStats};

/// Owns the shared gate for one session and wires it into every watched resource.
///
/// Construct once per session and call [`initialize`](Self::initialize) with the
/// resources present at that time. Resources discovered later are only watched
/// if `initialize` is invoked again with them.
///
/// Resources are keyed by [`ResourceId`]. Offering a resource whose id is held
/// by a different live resource logs a warning and leaves it unwatched.
pub struct ReloadThrottler {
    gate: Arc<ReloadGate>,
    stats: Arc<ThrottleStats>,
    runtime: Handle,
    watched: Mutex<HashMap<ResourceId, Weak<dyn ResourceHandle>>>,
}

impl ReloadThrottler {
    /// Create a throttler whose reload timers run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self::with_gate(runtime, ReloadGate::new())
    }

    /// Create a throttler bound to the runtime of the calling context.
    pub fn current() -> Result<Self> {
        let runtime = Handle::try_current().context("reload throttler needs a tokio runtime")?;
        Ok(Self::new(runtime))
    }

    pub fn with_gate(runtime: Handle, gate: ReloadGate) -> Self {
        Self {
            gate: Arc::new(gate),
            stats: Arc::new(ThrottleStats::default()),
            runtime,
            watched: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe a failure observer to each resource not already watched.
    pub fn initialize<I>(&self, resources: I)
    where
        I: IntoIterator<Item = Arc<dyn ResourceHandle>>,
    {
        let mut watched = self.watched.lock().unwrap_or_else(|e| e.into_inner());
        let mut attached = 0usize;
        for resource in resources {
            let id = resource.id();
            match watched.entry(id) {
                Entry::Occupied(mut held) => match held.get().upgrade() {
                    Some(existing) if same_resource(&existing, &resource) => continue,
                    Some(_) => {
                        tracing::warn!(
                            resource = %id,
                            source = resource.source(),
                            "resource id already watched by a different resource; not attaching"
                        );
                        continue;
                    }
                    None => {
                        held.insert(Arc::downgrade(&resource));
                    }
                },
                Entry::Vacant(slot) => {
                    slot.insert(Arc::downgrade(&resource));
                }
            }
            let observer = FailureObserver::new(
                &resource,
                Arc::clone(&self.gate),
                Arc::clone(&self.stats),
                self.runtime.clone(),
            );
            resource.subscribe_failure(observer);
            attached += 1;
        }
        tracing::info!(
            attached,
            watched = watched.len(),
            "reload throttler attached failure observers"
        );
    }

    /// Number of resources currently watched.
    pub fn watched(&self) -> usize {
        self.watched.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn gate(&self) -> &ReloadGate {
        &self.gate
    }

    pub fn stats(&self) -> &ThrottleStats {
        &self.stats
    }
}

fn same_resource(a: &Arc<dyn ResourceHandle>, b: &Arc<dyn ResourceHandle>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl std::fmt::Debug for ReloadThrottler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadThrottler")
            .field("gate", &self.gate)
            .field("stats", &self.stats)
            .field("watched", &self.watched())
            .finish()
    }
}
