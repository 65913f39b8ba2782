//! Upstream queueing limits the reload interval is sized against.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Queue limits of the server that renders thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamLimits {
    /// Maximum number of requests the upstream keeps queued.
    pub max_queued: u32,
    /// How long a queued request may wait before it is dropped.
    pub queue_timeout: Duration,
}

impl UpstreamLimits {
    /// Thumbnail scaler limits as of July 2022: 50 queued requests, 4 s timeout.
    pub const THUMBOR: UpstreamLimits = UpstreamLimits {
        max_queued: 50,
        queue_timeout: Duration::from_secs(4),
    };

    /// Smallest spacing that keeps a steady stream of requests inside the queue.
    pub fn min_spacing(&self) -> Duration {
        self.queue_timeout / self.max_queued.max(1)
    }

    /// True when requests spaced `interval` apart never overflow the queue.
    pub fn admits_interval(&self, interval: Duration) -> bool {
        interval >= self.min_spacing()
    }
}

impl Default for UpstreamLimits {
    fn default() -> Self {
        Self::THUMBOR
    }
}
