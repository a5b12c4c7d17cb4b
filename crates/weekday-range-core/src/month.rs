use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

use crate::calendar::{CalendarDate, is_weekend};
use crate::error::SelectionError;
use crate::selector::RangeSelector;

/// One displayed month of the picker.
///
/// Navigation is independent of the selection and never notifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthView {
    first: NaiveDate,
}

/// Render flags for a single day of a [`MonthView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub weekend: bool,
    pub in_range: bool,
    pub endpoint: bool,
    pub disabled: bool,
}

impl MonthView {
    /// `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, SelectionError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(SelectionError::InvalidMonth { year, month })
    }

    pub fn containing(date: CalendarDate) -> Self {
        Self {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> CalendarDate {
        self.first
    }

    pub fn num_days(&self) -> u32 {
        let (year, month) = (self.year(), self.month());
        (29..=31)
            .rev()
            .find(|d| NaiveDate::from_ymd_opt(year, month, *d).is_some())
            .unwrap_or(28)
    }

    /// `None` past the last representable month.
    pub fn next(&self) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
    }

    /// `None` before the first representable month.
    pub fn prev(&self) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
    }

    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        let first = self.first;
        (1..=self.num_days()).filter_map(move |d| first.with_day(d))
    }

    /// Sunday-first grid: `None` for the blank slots before day 1, then one cell per day.
    pub fn cells(&self, selector: &RangeSelector) -> Vec<Option<DayCell>> {
        let leading = self.first.weekday().num_days_from_sunday() as usize;
        let mut cells = vec![None; leading];
        cells.extend(self.days().map(|date| {
            Some(DayCell {
                date,
                weekend: is_weekend(date),
                in_range: selector.is_day_in_range(date),
                endpoint: selector.is_endpoint(date),
                disabled: selector.is_disabled(date),
            })
        }));
        cells
    }
}

impl fmt::Display for MonthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.first.format("%B %Y").to_string())
    }
}
