//! Recurring-entry expansion.
//!
//! Turns a stored [`Entry`] into the concrete [`Occurrence`]s that fall
//! inside a visible window. Expansion is total: malformed rules degrade to
//! fewer occurrences, never to an error, so it is safe to call from any
//! render path.

use chrono::{Days, Duration, NaiveDateTime};

use super::range::{week_start, DateWindow};
use super::recurrence::{occurrence_at, Frequency};
use super::types::{Entry, Occurrence};

/// Upper bound on cursor steps for a single expansion.
pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

/// What to return when a recurring entry produces no occurrence in the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the stored definition as the single occurrence.
    #[default]
    Definition,
    /// Return nothing.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandOptions {
    pub max_iterations: u32,
    pub fallback: FallbackPolicy,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fallback: FallbackPolicy::Definition,
        }
    }
}

/// Expands `entry` against `[range_start, range_end]` with default options.
pub fn expand(
    entry: &Entry,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> Vec<Occurrence> {
    expand_with(entry, range_start, range_end, &ExpandOptions::default())
}

/// Expands `entry` against `[range_start, range_end]`.
///
/// Non-recurring entries (including rules with an unknown frequency) are
/// returned as-is when they overlap the window. Recurring entries are walked
/// from their start, one period at a time, until the cursor passes the
/// rule's `until`, the window end, or the iteration cap. Weekly rules with a
/// weekday list walk whole weeks: the walk stops once the Sunday of the
/// cursor's week is past either bound.
///
/// An occurrence starting exactly at `range_end` is kept; use [`expand_all`]
/// for windows whose end is exclusive.
pub fn expand_with(
    entry: &Entry,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
    options: &ExpandOptions,
) -> Vec<Occurrence> {
    expand_bounded(entry, range_start, range_end, EndBound::Inclusive, options)
}

/// Expands every entry against `window` and returns the flattened list
/// sorted by start (stable, so same-start occurrences keep input order).
///
/// The window end is exclusive here: nothing generated from a rule starts
/// on the day after the window.
pub fn expand_all(
    entries: &[Entry],
    window: &DateWindow,
    options: &ExpandOptions,
) -> Vec<Occurrence> {
    let range_start = window.start_datetime();
    let range_end = window.end_datetime();

    let mut occurrences: Vec<Occurrence> = entries
        .iter()
        .flat_map(|entry| {
            expand_bounded(entry, range_start, range_end, EndBound::Exclusive, options)
        })
        .collect();
    occurrences.sort_by_key(|occurrence| occurrence.start);
    occurrences
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndBound {
    Inclusive,
    Exclusive,
}

impl EndBound {
    fn admits(self, candidate: NaiveDateTime, range_end: NaiveDateTime) -> bool {
        match self {
            EndBound::Inclusive => candidate <= range_end,
            EndBound::Exclusive => candidate < range_end,
        }
    }
}

fn expand_bounded(
    entry: &Entry,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
    bound: EndBound,
    options: &ExpandOptions,
) -> Vec<Occurrence> {
    let Some((freq, rule)) = entry.active_recurrence() else {
        return if overlaps(entry, range_start, range_end) {
            vec![Occurrence::from_definition(entry)]
        } else {
            Vec::new()
        };
    };

    // Tasks without an end still need a span for the lookback buffer.
    let duration = entry.duration().unwrap_or_else(|| Duration::hours(1));
    let rec_end = rule.until.unwrap_or(range_end);
    let interval = rule.effective_interval();
    let weekdays = rule.weekday_set();
    let by_weekday = freq == Frequency::Weekly && !weekdays.is_empty();
    let earliest = range_start
        .checked_sub_signed(duration)
        .unwrap_or(NaiveDateTime::MIN);

    let mut occurrences = Vec::new();
    let mut exhausted = true;

    for index in 0..options.max_iterations {
        let Some(current) = occurrence_at(entry.start, freq, interval, index) else {
            exhausted = false;
            break;
        };

        if by_weekday {
            // Candidates are checked against the window one by one, so the
            // cursor's lookback buffer does not apply here.
            let sunday = week_start(current.date()).and_time(entry.start.time());
            if sunday > rec_end || sunday > range_end {
                exhausted = false;
                break;
            }
            for day in &weekdays {
                let Some(date) = sunday.date().checked_add_days(Days::new(u64::from(*day))) else {
                    continue;
                };
                let candidate = date.and_time(entry.start.time());
                if candidate >= entry.start
                    && candidate >= range_start
                    && bound.admits(candidate, range_end)
                    && candidate <= rec_end
                {
                    occurrences.push(Occurrence::at(entry, candidate, duration));
                }
            }
            continue;
        }

        if current > rec_end || current > range_end {
            exhausted = false;
            break;
        }
        if current >= earliest && bound.admits(current, range_end) {
            occurrences.push(Occurrence::at(entry, current, duration));
        }
    }

    if exhausted {
        tracing::debug!(
            entry_id = %entry.id,
            max_iterations = options.max_iterations,
            "recurrence expansion stopped at iteration cap"
        );
    }

    if occurrences.is_empty() {
        return match options.fallback {
            FallbackPolicy::Definition => {
                tracing::trace!(
                    entry_id = %entry.id,
                    "no occurrences in window, returning definition"
                );
                vec![Occurrence::from_definition(entry)]
            }
            FallbackPolicy::Strict => Vec::new(),
        };
    }

    occurrences
}

/// Half-open overlap test used for non-recurring entries.
fn overlaps(entry: &Entry, range_start: NaiveDateTime, range_end: NaiveDateTime) -> bool {
    entry.start < range_end && entry.effective_end() >= range_start
}
