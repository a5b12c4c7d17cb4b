use chrono::Local;

use crate::calendar::CalendarDate;

/// Source of "today" for past-date checks and preset evaluation.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// The local calendar day of the host machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> CalendarDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
