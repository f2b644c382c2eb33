//! Injectable time source.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

/// Supplies "now" to the stage so interval arithmetic is deterministic
/// in tests; production code uses [`SystemClock`].
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests. Clones share the same instant, so a test
/// can hold one handle and advance time while the stage holds the other.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().expect("clock lock poisoned") = instant;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: chrono::Duration) {
        let mut instant = self.instant.lock().expect("clock lock poisoned");
        *instant = *instant + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().expect("clock lock poisoned")
    }
}
