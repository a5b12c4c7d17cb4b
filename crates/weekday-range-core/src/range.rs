use serde::Serialize;

use crate::calendar::CalendarDate;
use crate::error::SelectionError;
use crate::selector::Selection;

/// A possibly-open date interval.
///
/// `end` is only ever present together with `start`, and never before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    start: Option<CalendarDate>,
    end: Option<CalendarDate>,
}

impl DateRange {
    /// No dates selected.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start chosen, end pending.
    pub fn starting(start: CalendarDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// A closed interval. Fails if `start > end`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError::InvalidRange { start, end });
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    pub fn start(&self) -> Option<CalendarDate> {
        self.start
    }

    pub fn end(&self) -> Option<CalendarDate> {
        self.end
    }

    /// Both endpoints, when the range is complete.
    pub fn bounds(&self) -> Option<(CalendarDate, CalendarDate)> {
        self.start.zip(self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    pub fn is_partial(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// Whether `date` lies inside a complete range (inclusive). Always false otherwise.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| start <= date && date <= end)
    }

    /// Number of calendar days in a complete range, counting both endpoints.
    pub fn num_days(&self) -> Option<i64> {
        self.bounds()
            .map(|(start, end)| (end - start).num_days() + 1)
    }
}

impl From<Selection> for DateRange {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Empty => Self::empty(),
            Selection::Partial(start) => Self::starting(start),
            Selection::Complete(start, end) => Self {
                start: Some(start),
                end: Some(end),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_range() {
        let range = DateRange::empty();
        assert!(range.is_empty());
        assert!(!range.is_partial());
        assert!(!range.is_complete());
        assert_eq!(range.bounds(), None);
        assert!(!range.contains(date(2024, 3, 11)));
    }

    #[test]
    fn partial_range() {
        let range = DateRange::starting(date(2024, 3, 11));
        assert!(range.is_partial());
        assert!(!range.is_empty());
        assert_eq!(range.start(), Some(date(2024, 3, 11)));
        assert_eq!(range.end(), None);
        // partial ranges contain nothing, not even their start
        assert!(!range.contains(date(2024, 3, 11)));
    }

    #[test]
    fn complete_range_contains_endpoints() {
        let range = DateRange::new(date(2024, 3, 11), date(2024, 3, 22)).unwrap();
        assert!(range.is_complete());
        assert!(range.contains(date(2024, 3, 11)));
        assert!(range.contains(date(2024, 3, 16)));
        assert!(range.contains(date(2024, 3, 22)));
        assert!(!range.contains(date(2024, 3, 10)));
        assert!(!range.contains(date(2024, 3, 23)));
        assert_eq!(range.num_days(), Some(12));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(date(2024, 3, 13), date(2024, 3, 13)).unwrap();
        assert_eq!(range.num_days(), Some(1));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = DateRange::new(date(2024, 3, 11), date(2024, 3, 8)).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidRange { .. }));
    }

    #[test]
    fn serializes_missing_endpoints_as_null() {
        let json = serde_json::to_value(DateRange::starting(date(2024, 3, 11))).unwrap();
        assert_eq!(json, serde_json::json!({ "start": "2024-03-11", "end": null }));
    }
}
