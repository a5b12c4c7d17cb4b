//! Weekday-only date range selection.
//!
//! [`RangeSelector`] turns day clicks into a validated `(start, end)` pair whose
//! endpoints are never weekends, and reports each completed range together with
//! the weekend dates inside it. Rendering is left to the host; [`MonthView`]
//! supplies the per-day flags a calendar grid needs.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod month;
pub mod preset;
pub mod range;
pub mod selector;
pub mod session;

pub use calendar::{CalendarDate, is_weekend, weekdays_between, weekends_between};
pub use clock::{Clock, FixedClock, LocalClock};
pub use config::{PresetConfig, SelectorConfig};
pub use error::{PickError, SelectionError};
pub use month::{DayCell, MonthView};
pub use preset::{PresetRange, default_presets};
pub use range::DateRange;
pub use selector::{
    ChangeListener, IgnoreReason, PickOutcome, RangeChange, RangeSelector, Selection,
};
pub use session::SelectionSession;
