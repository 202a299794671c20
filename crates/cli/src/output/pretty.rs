//! Pretty output formatting.

use homefront_core::calendar::{DayData, Occurrence};

use crate::commands::{Agenda, RecurrenceSummary};

/// Format one occurrence as a single agenda line.
pub fn format_occurrence(occurrence: &Occurrence) -> String {
    let when = if occurrence.all_day {
        "all day".to_string()
    } else {
        match occurrence.end {
            Some(end) if end.date() == occurrence.start.date() => format!(
                "{}-{}",
                occurrence.start.format("%H:%M"),
                end.format("%H:%M")
            ),
            Some(end) => format!(
                "{}-{} {}",
                occurrence.start.format("%H:%M"),
                end.format("%b %-d"),
                end.format("%H:%M")
            ),
            None => occurrence.start.format("%H:%M").to_string(),
        }
    };

    let mut line = format!("{:<13} {}", when, occurrence.title);
    if occurrence.is_task() {
        line.push_str(if occurrence.is_completed {
            " [done]"
        } else {
            " [todo]"
        });
    }
    if occurrence.is_recurring {
        line.push_str(" (repeats)");
    }
    if let Some(location) = &occurrence.location {
        line.push_str(&format!(" @ {}", location));
    }
    line
}

/// Format a day with its all-day and timed occurrences.
pub fn format_day(day: &DayData) -> String {
    let marker = if day.is_today { " (today)" } else { "" };
    let mut output = format!("{}{}", day.date.format("%a %b %-d"), marker);
    for occurrence in day.all_day.iter().chain(day.timed.iter()) {
        output.push_str(&format!("\n  {}", format_occurrence(occurrence)));
    }
    output
}

/// Format an agenda, skipping days without occurrences.
pub fn format_agenda(agenda: &Agenda) -> String {
    let mut output = format!("{}\n", agenda.title.to_uppercase());
    output.push_str(&"-".repeat(40));

    let busy: Vec<&DayData> = agenda.days.iter().filter(|day| !day.is_empty()).collect();
    if busy.is_empty() {
        output.push_str("\nNo entries found.");
        return output;
    }
    for day in busy {
        output.push_str(&format!("\n{}", format_day(day)));
    }
    output
}

/// Format a list of occurrences, one per line with its date.
pub fn format_occurrences(occurrences: &[Occurrence]) -> String {
    if occurrences.is_empty() {
        return "No occurrences found.".to_string();
    }
    let mut output = format!("OCCURRENCES ({})\n", occurrences.len());
    output.push_str(&"-".repeat(40));
    for occurrence in occurrences {
        output.push_str(&format!(
            "\n{}  {}",
            occurrence.start_date(),
            format_occurrence(occurrence)
        ));
    }
    output
}

/// Format recurrence summaries.
pub fn format_summaries(summaries: &[RecurrenceSummary]) -> String {
    if summaries.is_empty() {
        return "No recurring entries found.".to_string();
    }
    let mut output = format!("RECURRING ENTRIES ({})\n", summaries.len());
    output.push_str(&"-".repeat(40));
    for summary in summaries {
        output.push_str(&format!(
            "\n{}\n  ID: {}\n  Repeats: {}",
            summary.title, summary.id, summary.description
        ));
    }
    output
}
