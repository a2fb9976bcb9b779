//! Time source abstraction

use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Source of the current time
///
/// Services never read the system time directly. Injecting the clock keeps
/// token expiry deterministic under test.
pub trait Clock: Send + Sync + Debug {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
