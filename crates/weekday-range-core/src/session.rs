use crate::calendar::CalendarDate;
use crate::error::PickError;

/// Ephemeral interaction state layered over the committed selection.
///
/// Never part of a change notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSession {
    /// Preview endpoint while a range is partial.
    pub hovered: Option<CalendarDate>,
    /// Set when an invalid endpoint was attempted.
    pub last_error: Option<PickError>,
}

impl SelectionSession {
    pub fn reset(&mut self) {
        self.hovered = None;
        self.last_error = None;
    }

    /// Whether `date` falls in the preview span `[start, hovered]`.
    /// Nothing qualifies when the hover sits before `start`.
    pub fn previews(&self, start: CalendarDate, date: CalendarDate) -> bool {
        self.hovered
            .is_some_and(|hovered| start <= date && date <= hovered)
    }
}
