use thiserror::Error;

/// Errors that can occur when validating a calendar entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Entry title cannot be empty")]
    EmptyTitle,
    #[error("Entry title too long (max 200 characters)")]
    TitleTooLong,
    #[error("End must be after or equal to start")]
    InvalidTimeRange,
    #[error("Recurring entry has no recurrence rule")]
    MissingRecurrence,
    #[error("Recurrence frequency is missing or unknown")]
    UnknownFrequency,
    #[error("Invalid weekday index: {0} (expected 0-6)")]
    InvalidWeekday(u8),
    #[error("Recurrence ends before the entry starts")]
    UntilBeforeStart,
}
