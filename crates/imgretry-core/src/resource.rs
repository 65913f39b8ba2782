//! Resource handles watched by the reload throttler.
//!
//! A resource is anything image-like that can report a failed load and be told
//! to request itself again. The concrete type comes from the environment (a
//! page element, a simulated image, a test double).

use std::fmt;

use crate::throttle::FailureObserver;

/// Stable identity of a watched resource, assigned by whoever enumerates them.
///
/// Ids must be unique among the live resources handed to one throttler. The
/// throttler watches the first resource it sees for an id and refuses others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A loadable image-like resource.
pub trait ResourceHandle: Send + Sync + 'static {
    fn id(&self) -> ResourceId;

    /// The source this resource loads from. Reloading re-requests the same source.
    fn source(&self) -> &str;

    /// Register an observer to be notified every time a load fails.
    ///
    /// Implementations call [`FailureObserver::notify`] once per failed load.
    fn subscribe_failure(&self, observer: FailureObserver);

    /// Re-request the resource from its current source.
    fn reload(&self);
}
