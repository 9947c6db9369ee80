//! Date filtering over listed entries

use crate::domain::entry::Entry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that falls on a calendar day.
///
/// Time of day and offset are dropped; the day as written is kept.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl CalendarDay for Entry {
    fn calendar_day(&self) -> NaiveDate {
        self.date
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> NaiveDate {
        (**self).calendar_day()
    }
}

/// Entries falling on `selected`, in input order
pub fn filter_by_date<'a, T, D>(entries: &'a [T], selected: &D) -> Vec<&'a T>
where
    T: CalendarDay,
    D: CalendarDay + ?Sized,
{
    let day = selected.calendar_day();
    entries
        .iter()
        .filter(|entry| entry.calendar_day() == day)
        .collect()
}
