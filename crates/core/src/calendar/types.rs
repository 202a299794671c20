use std::ops::Deref;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recurrence::{Frequency, Recurrence};

/// Whether an entry is a calendar event or a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Event,
    Task,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Event => "event",
            EntryType::Task => "task",
        }
    }
}

/// A stored event or task definition, possibly recurring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
    pub title: String,
    #[serde(deserialize_with = "crate::serde::deserialize_timestamp")]
    pub start: NaiveDateTime,
    #[serde(
        default,
        deserialize_with = "crate::serde::deserialize_optional_timestamp"
    )]
    pub end: Option<NaiveDateTime>,
    /// Start and end are whole-day boundaries regardless of their time-of-day.
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "crate::serde::deserialize_lenient")]
    pub recurrence: Option<Recurrence>,
    #[serde(default)]
    pub is_completed: bool,
    /// Accent color for the entry tile (CSS color value).
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub location: Option<String>,
}

impl Entry {
    fn new(entry_type: EntryType, title: String, start: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            entry_type,
            title,
            start,
            end: None,
            all_day: false,
            is_recurring: false,
            recurrence: None,
            is_completed: false,
            color: None,
            description: None,
            location: None,
        }
    }

    /// Creates a timed event.
    pub fn event(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(EntryType::Event, title.into(), start).with_end(end)
    }

    /// Creates a single-day all-day event.
    pub fn all_day(title: impl Into<String>, date: NaiveDate) -> Self {
        let mut entry = Self::new(EntryType::Event, title.into(), date.and_time(NaiveTime::MIN));
        entry.all_day = true;
        entry
    }

    /// Creates an all-day event covering `start` through `last_day`, inclusive.
    pub fn all_day_span(title: impl Into<String>, start: NaiveDate, last_day: NaiveDate) -> Self {
        Self::all_day(title, start).with_end(last_day.and_time(NaiveTime::MIN))
    }

    /// Creates a task due at `due`, without a duration.
    pub fn task(title: impl Into<String>, due: NaiveDateTime) -> Self {
        Self::new(EntryType::Task, title.into(), due)
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Attaches a recurrence rule and marks the entry as recurring.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.is_recurring = true;
        self.recurrence = Some(recurrence);
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.is_completed = completed;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets a specific ID for this entry (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// The end timestamp, or the start when the entry has no end.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end.unwrap_or(self.start)
    }

    /// `end - start`, when the entry has an end.
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    pub fn is_task(&self) -> bool {
        self.entry_type == EntryType::Task
    }

    /// The recurrence rule to expand with, if the entry actually recurs.
    ///
    /// Returns None when the entry is not flagged recurring, has no rule, or
    /// the rule's frequency is unknown.
    pub fn active_recurrence(&self) -> Option<(Frequency, &Recurrence)> {
        if !self.is_recurring {
            return None;
        }
        let recurrence = self.recurrence.as_ref()?;
        Some((recurrence.freq?, recurrence))
    }
}

/// One concrete, dated instance of an [`Entry`].
///
/// Carries the same fields as its source entry (including the id) with the
/// occurrence's own start and end. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Occurrence(Entry);

impl Occurrence {
    /// The stored definition itself, as a single occurrence.
    pub fn from_definition(entry: &Entry) -> Self {
        Self(entry.clone())
    }

    /// An occurrence of `entry` starting at `start`. The end is only set when
    /// the source entry has one.
    pub(crate) fn at(entry: &Entry, start: NaiveDateTime, duration: Duration) -> Self {
        let mut instance = entry.clone();
        instance.start = start;
        instance.end = entry
            .end
            .map(|_| start.checked_add_signed(duration).unwrap_or(NaiveDateTime::MAX));
        Self(instance)
    }

    pub fn entry(&self) -> &Entry {
        &self.0
    }

    pub fn into_entry(self) -> Entry {
        self.0
    }

    pub fn start_date(&self) -> NaiveDate {
        self.0.start.date()
    }
}

impl Deref for Occurrence {
    type Target = Entry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Occurrences touching a single calendar day, split the way day cells
/// render them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayData {
    pub date: NaiveDate,
    pub is_today: bool,
    pub all_day: Vec<Occurrence>,
    pub timed: Vec<Occurrence>,
}

impl DayData {
    /// Creates an empty DayData for the given date.
    pub fn empty(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            is_today: date == today,
            all_day: Vec::new(),
            timed: Vec::new(),
        }
    }

    /// Returns true if this day has no occurrences.
    pub fn is_empty(&self) -> bool {
        self.all_day.is_empty() && self.timed.is_empty()
    }

    /// Returns the number of occurrences for this day.
    pub fn entry_count(&self) -> usize {
        self.all_day.len() + self.timed.len()
    }
}
