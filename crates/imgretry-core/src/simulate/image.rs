//! Gallery image backed by the simulated upstream.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::resource::{ResourceHandle, ResourceId};
use crate::throttle::FailureObserver;

use super::upstream::SimulatedUpstream;

/// An image element: loads its source from the upstream and reports failures
/// to its subscribed observers, like an `<img>` firing `error`.
#[derive(Debug)]
pub struct SimulatedImage {
    id: ResourceId,
    source: String,
    upstream: Arc<SimulatedUpstream>,
    observers: Mutex<Vec<FailureObserver>>,
    attempts: AtomicU32,
    loaded: AtomicBool,
    loaded_count: Arc<watch::Sender<usize>>,
}

impl SimulatedImage {
    /// `loaded_count` is bumped once when this image first loads successfully.
    pub fn new(
        id: ResourceId,
        source: impl Into<String>,
        upstream: Arc<SimulatedUpstream>,
        loaded_count: Arc<watch::Sender<usize>>,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            upstream,
            observers: Mutex::new(Vec::new()),
            attempts: AtomicU32::new(0),
            loaded: AtomicBool::new(false),
            loaded_count,
        }
    }

    /// Request the source once; on rejection notify every failure observer.
    pub fn load(&self) {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        match self.upstream.request(&self.source) {
            Ok(()) => {
                if !self.loaded.swap(true, Ordering::AcqRel) {
                    self.loaded_count.send_modify(|n| *n += 1);
                }
                tracing::trace!(resource = %self.id, attempt, "image loaded");
            }
            Err(e) => {
                tracing::trace!(resource = %self.id, attempt, error = %e, "image failed to load");
                let observers = self
                    .observers
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .clone();
                for observer in observers {
                    observer.notify();
                }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    /// Number of load requests issued so far (initial load included).
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl ResourceHandle for SimulatedImage {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn subscribe_failure(&self, observer: FailureObserver) {
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(observer);
    }

    fn reload(&self) {
        self.load();
    }
}
