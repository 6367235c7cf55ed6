//! Day-boundary arithmetic in the learner's own timezone.
//!
//! Streaks and daily rollovers are counted in calendar days, so two sessions at
//! 23:50 and 00:10 are one day apart while two sessions 20 hours apart on the
//! same date are zero days apart.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

pub trait StudyCalendar {
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate;
}

impl StudyCalendar for Utc {
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.date_naive()
    }
}

impl StudyCalendar for FixedOffset {
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(self).date_naive()
    }
}

impl StudyCalendar for Local {
    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(self).date_naive()
    }
}

/// Whole calendar days from `earlier` to `later`; negative when `later` falls on an earlier date.
pub fn calendar_day_difference<C: StudyCalendar + ?Sized>(
    calendar: &C,
    earlier: DateTime<Utc>,
    later: DateTime<Utc>,
) -> i64 {
    (calendar.local_date(later) - calendar.local_date(earlier)).num_days()
}
