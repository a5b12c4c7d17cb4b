use serde::Serialize;
use tracing::{debug, info};

use crate::calendar::{CalendarDate, is_weekend, weekends_between};
use crate::clock::{Clock, LocalClock};
use crate::config::SelectorConfig;
use crate::error::{PickError, SelectionError};
use crate::preset::PresetRange;
use crate::range::DateRange;
use crate::session::SelectionSession;

/// Committed selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    Empty,
    Partial(CalendarDate),
    /// Invariant: start <= end.
    Complete(CalendarDate, CalendarDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Weekend,
    PastDate,
}

/// What a single pick did to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Not a candidate endpoint; nothing changed.
    Ignored(IgnoreReason),
    /// A new range began at the picked date.
    Started,
    /// End before start; the session error is set.
    Rejected,
    /// The range closed and listeners were notified.
    Completed,
}

/// Payload delivered to the change listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeChange {
    pub range: DateRange,
    pub weekends: Vec<CalendarDate>,
}

/// Receives one call per completed or preset-applied range.
pub trait ChangeListener {
    fn range_changed(&mut self, change: &RangeChange);
}

impl<F> ChangeListener for F
where
    F: FnMut(&RangeChange),
{
    fn range_changed(&mut self, change: &RangeChange) {
        (*self)(change)
    }
}

/// Weekday-only range selection state machine.
///
/// Endpoints picked by hand must be weekdays (and not in the past when
/// `disable_past_dates` is set). Presets bypass both checks.
pub struct RangeSelector {
    selection: Selection,
    session: SelectionSession,
    disable_past_dates: bool,
    presets: Vec<PresetRange>,
    clock: Box<dyn Clock>,
    listener: Option<Box<dyn ChangeListener>>,
}

impl RangeSelector {
    /// Create a selector that reads today from the local clock.
    pub fn new(config: &SelectorConfig) -> Self {
        Self::with_clock(config, LocalClock)
    }

    pub fn with_clock(config: &SelectorConfig, clock: impl Clock + 'static) -> Self {
        Self {
            selection: Selection::Empty,
            session: SelectionSession::default(),
            disable_past_dates: config.disable_past_dates,
            presets: config.preset_ranges(),
            clock: Box::new(clock),
            listener: None,
        }
    }

    /// Register the change listener, replacing any previous one.
    pub fn on_change(&mut self, listener: impl ChangeListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Handle a click on `date`.
    pub fn pick_date(&mut self, date: CalendarDate) -> Result<PickOutcome, SelectionError> {
        if is_weekend(date) {
            debug!("ignoring pick of weekend day {date}");
            return Ok(PickOutcome::Ignored(IgnoreReason::Weekend));
        }
        if self.is_disabled(date) {
            debug!("ignoring pick of past day {date}");
            return Ok(PickOutcome::Ignored(IgnoreReason::PastDate));
        }

        match self.selection {
            Selection::Empty | Selection::Complete(..) => {
                self.selection = Selection::Partial(date);
                self.session.reset();
                debug!("range started at {date}");
                Ok(PickOutcome::Started)
            }
            Selection::Partial(start) if date < start => {
                debug!("rejected end {date} before start {start}");
                self.session.last_error = Some(PickError::EndBeforeStart {
                    start,
                    attempted: date,
                });
                Ok(PickOutcome::Rejected)
            }
            Selection::Partial(start) => {
                let weekends = weekends_between(start, date)?;
                self.selection = Selection::Complete(start, date);
                self.session.last_error = None;
                self.notify(start, date, weekends);
                Ok(PickOutcome::Completed)
            }
        }
    }

    /// Set or clear the preview endpoint. Never changes the selection.
    pub fn hover(&mut self, date: Option<CalendarDate>) {
        self.session.hovered = date;
    }

    /// Drop the selection and session without notifying.
    pub fn clear(&mut self) {
        debug!("selection cleared");
        self.selection = Selection::Empty;
        self.session.reset();
    }

    /// Jump straight to a complete range and notify.
    ///
    /// Weekend and past-date checks do not apply to presets.
    pub fn apply_preset(&mut self, range: DateRange) -> Result<(), SelectionError> {
        let (start, end) = range.bounds().ok_or(SelectionError::IncompleteRange)?;
        let weekends = weekends_between(start, end)?;
        self.selection = Selection::Complete(start, end);
        self.session.last_error = None;
        self.notify(start, end, weekends);
        Ok(())
    }

    /// Resolve the preset named `label` (case-insensitive) against today and apply it.
    pub fn apply_preset_by_label(&mut self, label: &str) -> Result<DateRange, SelectionError> {
        let today = self.today();
        let range = self
            .presets
            .iter()
            .find(|p| p.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| SelectionError::UnknownPreset(label.to_string()))?
            .resolve(today)?;
        debug!("preset {label} resolved to {range:?}");
        self.apply_preset(range)?;
        Ok(range)
    }

    pub fn current_range(&self) -> DateRange {
        self.selection.into()
    }

    pub fn state(&self) -> Selection {
        self.selection
    }

    pub fn session_error(&self) -> Option<&PickError> {
        self.session.last_error.as_ref()
    }

    pub fn hovered(&self) -> Option<CalendarDate> {
        self.session.hovered
    }

    pub fn presets(&self) -> &[PresetRange] {
        &self.presets
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Whether `date` should be highlighted as part of the committed range
    /// or the hover preview of a partial one.
    pub fn is_day_in_range(&self, date: CalendarDate) -> bool {
        match self.selection {
            Selection::Empty => false,
            Selection::Partial(start) => self.session.previews(start, date),
            Selection::Complete(start, end) => start <= date && date <= end,
        }
    }

    pub fn is_endpoint(&self, date: CalendarDate) -> bool {
        match self.selection {
            Selection::Empty => false,
            Selection::Partial(start) => date == start,
            Selection::Complete(start, end) => date == start || date == end,
        }
    }

    /// Past days are unclickable when `disable_past_dates` is set.
    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        self.disable_past_dates && date < self.today()
    }

    fn notify(&mut self, start: CalendarDate, end: CalendarDate, weekends: Vec<CalendarDate>) {
        info!(
            "range changed: {start} to {end}, {} weekend day(s)",
            weekends.len()
        );
        let change = RangeChange {
            range: self.current_range(),
            weekends,
        };
        if let Some(listener) = self.listener.as_mut() {
            listener.range_changed(&change);
        }
    }
}
