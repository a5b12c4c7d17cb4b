use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::SelectionError;

/// A calendar day with no time-of-day component.
pub type CalendarDate = NaiveDate;

/// Saturday or Sunday.
pub fn is_weekend(date: CalendarDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns all weekend dates (Sat, Sun) in the inclusive range [start, end], ascending.
///
/// Endpoints are included when they fall on a weekend.
pub fn weekends_between(
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CalendarDate>, SelectionError> {
    scan(start, end, is_weekend)
}

/// Returns all weekdays (Mon-Fri) in the inclusive range [start, end], ascending.
pub fn weekdays_between(
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CalendarDate>, SelectionError> {
    scan(start, end, |d| !is_weekend(d))
}

fn scan(
    start: CalendarDate,
    end: CalendarDate,
    keep: impl Fn(CalendarDate) -> bool,
) -> Result<Vec<CalendarDate>, SelectionError> {
    if start > end {
        return Err(SelectionError::InvalidRange { start, end });
    }
    let mut dates = Vec::new();
    let mut current = Some(start);
    while let Some(day) = current.filter(|d| *d <= end) {
        if keep(day) {
            dates.push(day);
        }
        // None past NaiveDate::MAX
        current = day.succ_opt();
    }
    Ok(dates)
}
