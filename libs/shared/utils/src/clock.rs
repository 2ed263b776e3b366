use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Lead-time and confirmation-deadline checks compare against this instead of
/// calling `Utc::now()` directly, so tests can pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
