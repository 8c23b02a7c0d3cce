//! Date source for version stamps

use chrono::{Datelike, Days, NaiveDate, Utc};
use std::fmt::Debug;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Supplies today's date
pub trait Clock: Debug + Send + Sync {
    /// Current date
    fn today(&self) -> NaiveDate;
}

/// UTC wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Settable clock; clones share the same date
#[derive(Debug, Clone)]
pub struct FixedClock {
    days_from_ce: Arc<AtomicI32>,
}

impl FixedClock {
    /// Clock stopped at `day`
    #[must_use]
    pub fn new(day: NaiveDate) -> Self {
        Self {
            days_from_ce: Arc::new(AtomicI32::new(day.num_days_from_ce())),
        }
    }

    /// Move to `day`
    pub fn set(&self, day: NaiveDate) {
        self.days_from_ce.store(day.num_days_from_ce(), Ordering::SeqCst);
    }

    /// Move forward by `days`
    pub fn advance_days(&self, days: u64) {
        let next = self.today().checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.days_from_ce.load(Ordering::SeqCst))
            .unwrap_or(NaiveDate::MIN)
    }
}
