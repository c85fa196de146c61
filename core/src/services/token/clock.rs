//! Time source for issuing and expiring tokens

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-utils"))]
mod manual {
    use chrono::{DateTime, Duration, Utc};
    use std::sync::RwLock;

    use super::Clock;

    /// Clock that only moves when told to
    #[derive(Debug)]
    pub struct ManualClock {
        now: RwLock<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: RwLock::new(start),
            }
        }

        /// Starts at the current wall-clock second
        pub fn starting_now() -> Self {
            let now = Utc::now();
            Self::new(now - Duration::nanoseconds(i64::from(now.timestamp_subsec_nanos())))
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
            *now = *now + by;
        }

        pub fn set(&self, to: DateTime<Utc>) {
            *self.now.write().unwrap_or_else(|e| e.into_inner()) = to;
        }
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::starting_now()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.read().unwrap_or_else(|e| e.into_inner())
        }
    }
}
