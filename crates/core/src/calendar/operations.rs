use super::error::EntryError;
use super::types::{Entry, EntryType, Occurrence};

/// Filters occurrences by entry type.
pub fn filter_by_type(occurrences: &[Occurrence], entry_type: EntryType) -> Vec<&Occurrence> {
    occurrences
        .iter()
        .filter(|occurrence| occurrence.entry_type == entry_type)
        .collect()
}

/// Tasks that are not yet completed.
pub fn pending_tasks(occurrences: &[Occurrence]) -> Vec<&Occurrence> {
    occurrences
        .iter()
        .filter(|occurrence| occurrence.is_task() && !occurrence.is_completed)
        .collect()
}

/// Validates an entry before it is stored.
///
/// Expansion never rejects entries; this is for the write path, so bad rows
/// are caught before they reach storage.
pub fn validate_entry(entry: &Entry) -> Result<(), EntryError> {
    if entry.title.trim().is_empty() {
        return Err(EntryError::EmptyTitle);
    }
    if entry.title.len() > 200 {
        return Err(EntryError::TitleTooLong);
    }
    if entry.end.is_some_and(|end| end < entry.start) {
        return Err(EntryError::InvalidTimeRange);
    }

    if entry.is_recurring {
        let recurrence = entry
            .recurrence
            .as_ref()
            .ok_or(EntryError::MissingRecurrence)?;
        if recurrence.freq.is_none() {
            return Err(EntryError::UnknownFrequency);
        }
        if let Some(day) = recurrence.days_of_week.iter().find(|d| **d > 6) {
            return Err(EntryError::InvalidWeekday(*day));
        }
        if recurrence.until.is_some_and(|until| until < entry.start) {
            return Err(EntryError::UntilBeforeStart);
        }
    }

    Ok(())
}
