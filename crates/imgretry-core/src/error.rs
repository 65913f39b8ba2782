//! Domain error types.

use thiserror::Error;

/// Rejection from the (simulated) upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Queue full: the upstream answered 429.
    #[error("429 Too Many Requests: {queued} requests already queued for {source_url}")]
    TooManyRequests { source_url: String, queued: usize },
}

impl UpstreamError {
    pub fn status(&self) -> u16 {
        match self {
            UpstreamError::TooManyRequests { .. } => 429,
        }
    }
}

/// Failure to build a description page URL.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("image has no title to open")]
    EmptyTitle,
    #[error("description page base cannot take path segments: {0}")]
    InvalidBase(url::Url),
    #[error("invalid description page base: {0}")]
    BaseParse(#[from] url::ParseError),
}
