use std::fmt;

use chrono::{Days, NaiveDate};

use crate::calendar::CalendarDate;
use crate::error::SelectionError;
use crate::range::DateRange;

type Supplier = dyn Fn(CalendarDate) -> Result<DateRange, SelectionError>;

/// A named shortcut that produces a ready-made range on demand.
///
/// The supplier receives today's date at invocation time; nothing is cached.
pub struct PresetRange {
    label: String,
    supplier: Box<Supplier>,
}

impl PresetRange {
    pub fn new(
        label: impl Into<String>,
        supplier: impl Fn(CalendarDate) -> Result<DateRange, SelectionError> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            supplier: Box::new(supplier),
        }
    }

    /// Rolling window `[today - days, today]`.
    pub fn days_back(label: impl Into<String>, days: u32) -> Self {
        Self::new(label, move |today| {
            let start = today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN);
            DateRange::new(start, today)
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Evaluate the supplier against `today`.
    pub fn resolve(&self, today: CalendarDate) -> Result<DateRange, SelectionError> {
        (self.supplier)(today)
    }
}

impl fmt::Debug for PresetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetRange")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// "Last 7 Days" and "Last 30 Days".
pub fn default_presets() -> Vec<PresetRange> {
    vec![
        PresetRange::days_back("Last 7 Days", 7),
        PresetRange::days_back("Last 30 Days", 30),
    ]
}
