//! Clock capability used for timestamps and uniqueness tokens

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Token that distinguishes entries created for the same date
    fn token(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock. Tokens are milliseconds since the epoch, bumped forward when
/// two calls land in the same millisecond so a process never repeats one.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_token: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn token(&self) -> i64 {
        let millis = self.now().timestamp_millis();
        let previous = self
            .last_token
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(millis.max(last + 1))
            })
            .unwrap_or(millis);
        millis.max(previous + 1)
    }
}

/// Clock frozen at one instant; tokens are that instant's milliseconds
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        FixedClock { instant }
    }

    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self::new)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
