//! Test resource that records when it was reloaded.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use imgretry_core::resource::{ResourceHandle, ResourceId};
use imgretry_core::throttle::FailureObserver;
use tokio::time::Instant;

/// Fails on demand, and fails again on the next `refail` reloads.
pub struct FlakyImage {
    id: ResourceId,
    source: String,
    observers: Mutex<Vec<FailureObserver>>,
    reloads: Mutex<Vec<Instant>>,
    refail: AtomicU32,
}

impl FlakyImage {
    pub fn new(id: u64) -> Arc<Self> {
        Self::refailing(id, 0)
    }

    pub fn refailing(id: u64, refail: u32) -> Arc<Self> {
        Arc::new(Self {
            id: ResourceId(id),
            source: format!("https://upload.example.org/thumb/{id}.jpg"),
            observers: Mutex::new(Vec::new()),
            reloads: Mutex::new(Vec::new()),
            refail: AtomicU32::new(refail),
        })
    }

    pub fn handle(self: &Arc<Self>) -> Arc<dyn ResourceHandle> {
        Arc::clone(self) as Arc<dyn ResourceHandle>
    }

    /// Fire the failure event.
    pub fn fail(&self) {
        let observers = self.observers.lock().unwrap().clone();
        for o in observers {
            o.notify();
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.lock().unwrap().len()
    }

    /// Reload times in whole milliseconds after `t0`.
    pub fn reload_offsets_ms(&self, t0: Instant) -> Vec<u128> {
        self.reloads
            .lock()
            .unwrap()
            .iter()
            .map(|at| (*at - t0).as_millis())
            .collect()
    }
}

impl ResourceHandle for FlakyImage {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn subscribe_failure(&self, observer: FailureObserver) {
        self.observers.lock().unwrap().push(observer);
    }

    fn reload(&self) {
        self.reloads.lock().unwrap().push(Instant::now());
        let again = self
            .refail
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if again {
            self.fail();
        }
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
