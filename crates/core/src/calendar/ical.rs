//! iCalendar (RFC 5545) export.
//!
//! Entries are written as stored definitions: recurring entries carry an
//! `RRULE` instead of being expanded. Events become `VEVENT`s and tasks
//! become `VTODO`s.

use chrono::{Days, Duration, NaiveDateTime};
use icalendar::{Calendar, Component, Property, ValueType};

use super::recurrence::Recurrence;
use super::types::Entry;

pub const PRODUCT_ID: &str = "-//Homefront//Calendar//EN";
pub const CALENDAR_NAME: &str = "Homefront Calendar";

const WEEKDAY_CODES: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// Writes `entries` as a complete `VCALENDAR` document.
///
/// `stamp` becomes every component's `DTSTAMP` (written as UTC).
pub fn write_calendar(entries: &[Entry], stamp: NaiveDateTime) -> String {
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();
    let mut cal = Calendar::new();

    for entry in entries {
        if entry.is_task() {
            let mut todo = icalendar::Todo::new();
            add_common_properties(&mut todo, entry, &dtstamp);
            if entry.is_completed {
                todo.add_property("STATUS", "COMPLETED");
            }
            cal.push(todo.done());
        } else {
            let mut event = icalendar::Event::new();
            add_common_properties(&mut event, entry, &dtstamp);
            add_time_property(&mut event, "DTEND", export_end(entry), entry.all_day);
            cal.push(event.done());
        }
    }

    let cal = cal.done();
    tracing::debug!(entries = entries.len(), "wrote calendar export");
    finish_output(&cal.to_string())
}

/// The `RRULE` value for `rule`, or None when the rule does not recur.
///
/// `UNTIL` uses the same value type as the entry's `DTSTART`.
pub fn build_rrule(rule: &Recurrence, all_day: bool) -> Option<String> {
    let freq = rule.freq?;
    let mut parts = vec![format!("FREQ={}", freq.as_str().to_ascii_uppercase())];

    if rule.interval > 1 {
        parts.push(format!("INTERVAL={}", rule.interval));
    }
    let days = rule.weekday_set();
    if !days.is_empty() {
        let codes: Vec<&str> = days.iter().map(|d| WEEKDAY_CODES[usize::from(*d)]).collect();
        parts.push(format!("BYDAY={}", codes.join(",")));
    }
    if let Some(until) = rule.until {
        parts.push(format!("UNTIL={}", format_time(until, all_day)));
    }

    Some(parts.join(";"))
}

/// Escapes a TEXT property value.
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
}

fn format_time(at: NaiveDateTime, all_day: bool) -> String {
    if all_day {
        at.format("%Y%m%d").to_string()
    } else {
        at.format("%Y%m%dT%H%M%S").to_string()
    }
}

fn add_common_properties<C: Component>(component: &mut C, entry: &Entry, dtstamp: &str) {
    component.add_property("UID", format!("{}@homefront", entry.id));
    component.add_property("DTSTAMP", dtstamp);
    component.add_property("SUMMARY", escape_text(&entry.title));
    add_time_property(component, "DTSTART", entry.start, entry.all_day);

    if let Some(description) = &entry.description {
        component.add_property("DESCRIPTION", escape_text(description));
    }
    if let Some(location) = &entry.location {
        component.add_property("LOCATION", escape_text(location));
    }
    if let Some((_, rule)) = entry.active_recurrence() {
        if let Some(rrule) = build_rrule(rule, entry.all_day) {
            component.add_property("RRULE", rrule);
        }
    }
}

fn add_time_property<C: Component>(
    component: &mut C,
    name: &str,
    at: NaiveDateTime,
    all_day: bool,
) {
    if all_day {
        let mut prop = Property::new(name, format_time(at, true));
        prop.append_parameter(ValueType::Date);
        component.append_property(prop);
    } else {
        component.add_property(name, format_time(at, false));
    }
}

/// `DTEND` for an event. All-day ends are exclusive, so they land on the
/// day after the last day. Timed events without an end last one hour.
fn export_end(entry: &Entry) -> NaiveDateTime {
    if entry.all_day {
        let last = entry.end.unwrap_or(entry.start);
        return last.checked_add_days(Days::new(1)).unwrap_or(last);
    }
    entry.end.unwrap_or_else(|| {
        entry
            .start
            .checked_add_signed(Duration::hours(1))
            .unwrap_or(entry.start)
    })
}

fn finish_output(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + 64);
    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:{PRODUCT_ID}\r\n"));
            result.push_str(&format!("X-WR-CALNAME:{CALENDAR_NAME}\r\n"));
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }
    result
}
