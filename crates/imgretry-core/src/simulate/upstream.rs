//! Simulated thumbnail server with a bounded request queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::time::Instant;

use crate::error::UpstreamError;
use crate::upstream::UpstreamLimits;

/// Sliding-window admission: at most `max_queued` requests are admitted within
/// any `queue_timeout` window; the rest are rejected with 429.
#[derive(Debug)]
pub struct SimulatedUpstream {
    limits: UpstreamLimits,
    admitted_at: Mutex<VecDeque<Instant>>,
    requests: Mutex<Vec<(Instant, String)>>,
    admitted: AtomicU64,
    rejected: AtomicU64,
}

impl SimulatedUpstream {
    pub fn new(limits: UpstreamLimits) -> Self {
        Self {
            limits,
            admitted_at: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            admitted: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    pub fn limits(&self) -> UpstreamLimits {
        self.limits
    }

    /// Request `source` now.
    pub fn request(&self, source: &str) -> Result<(), UpstreamError> {
        self.request_at(source, Instant::now())
    }

    /// Request `source` at `now`.
    pub fn request_at(&self, source: &str, now: Instant) -> Result<(), UpstreamError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((now, source.to_string()));

        let mut window = self.admitted_at.lock().unwrap_or_else(|e| e.into_inner());
        while let Some(&oldest) = window.front() {
            if now.saturating_duration_since(oldest) >= self.limits.queue_timeout {
                window.pop_front();
            } else {
                break;
            }
        }
        if window.len() >= self.limits.max_queued as usize {
            self.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(UpstreamError::TooManyRequests {
                source_url: source.to_string(),
                queued: window.len(),
            });
        }
        window.push_back(now);
        self.admitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn admitted(&self) -> u64 {
        self.admitted.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Every request received so far, in arrival order.
    pub fn request_log(&self) -> Vec<(Instant, String)> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received for `source`.
    pub fn requests_for(&self, source: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(_, s)| s == source)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn small() -> UpstreamLimits {
        UpstreamLimits {
            max_queued: 2,
            queue_timeout: Duration::from_millis(1000),
        }
    }

    #[test]
    fn rejects_once_window_is_full() {
        let upstream = SimulatedUpstream::new(small());
        let t0 = Instant::now();
        assert!(upstream.request_at("a", t0).is_ok());
        assert!(upstream.request_at("b", t0).is_ok());
        let err = upstream.request_at("c", t0).unwrap_err();
        assert_eq!(err.status(), 429);
        assert_eq!(upstream.admitted(), 2);
        assert_eq!(upstream.rejected(), 1);
    }

    #[test]
    fn window_frees_after_queue_timeout() {
        let upstream = SimulatedUpstream::new(small());
        let t0 = Instant::now();
        upstream.request_at("a", t0).unwrap();
        upstream.request_at("b", t0 + Duration::from_millis(500)).unwrap();
        assert!(upstream
            .request_at("c", t0 + Duration::from_millis(999))
            .is_err());
        // "a" has aged out; "b" is still queued.
        assert!(upstream
            .request_at("c", t0 + Duration::from_millis(1000))
            .is_ok());
        assert!(upstream
            .request_at("d", t0 + Duration::from_millis(1000))
            .is_err());
    }

    #[test]
    fn request_log_records_rejected_requests_too() {
        let upstream = SimulatedUpstream::new(small());
        let t0 = Instant::now();
        for s in ["a", "b", "c", "c"] {
            let _ = upstream.request_at(s, t0);
        }
        assert_eq!(upstream.request_log().len(), 4);
        assert_eq!(upstream.requests_for("c"), 2);
    }
}
