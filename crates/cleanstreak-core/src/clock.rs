//! Injectable time source.
//!
//! All "now" and "today" questions go through [`Clock`]. Production code uses
//! [`SystemClock`]; tests drive a [`ManualClock`] across day boundaries
//! without waiting on real timers.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    /// Current instant, carrying the viewer's UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }

    /// Local calendar date; the unit of "one check-in per day".
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock pinned to `now`, expressed in UTC.
    pub fn at_utc(now: DateTime<Utc>) -> Self {
        Self::new(now.fixed_offset())
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// The next local midnight strictly after `now`, in `now`'s offset.
pub fn next_local_midnight(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let tomorrow = now.date_naive() + Duration::days(1);
    let midnight = tomorrow.and_time(chrono::NaiveTime::MIN);
    // A fixed offset maps every local time to exactly one instant.
    now + (midnight - now.naive_local())
}

/// Time left until [`next_local_midnight`].
pub fn until_next_midnight(now: DateTime<FixedOffset>) -> Duration {
    next_local_midnight(now) - now
}
