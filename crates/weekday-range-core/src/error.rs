use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Range must have both a start and an end date")]
    IncompleteRange,

    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// User-facing rejection of a picked date, kept in the selection session
/// until the next successful transition or clear.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("End date cannot be before start date.")]
    EndBeforeStart {
        start: NaiveDate,
        attempted: NaiveDate,
    },
}
