//! Mock data generation for testing and seeding.
//!
//! This module contains pure functions for generating mock calendar entries.
//! Apart from fresh entry ids, the output depends only on the arguments.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::range::{shift_days, week_start};
use super::recurrence::Recurrence;
use super::types::Entry;

fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

/// `start + length`, saturating at `start` when that leaves chrono's range.
fn lasting(start: NaiveDateTime, length: Duration) -> NaiveDateTime {
    start.checked_add_signed(length).unwrap_or(start)
}

/// Generate mock calendar entries spread around a center date.
///
/// Creates a realistic distribution of entries:
/// - ~10% multi-day all-day events (leave blocks, training)
/// - ~15% single all-day events (paydays, holidays)
/// - ~25% recurring events (weekly, daily, monthly, yearly)
/// - ~30% one-off timed events (appointments)
/// - ~20% tasks, every third one recurring
///
/// # Example
///
/// ```
/// use homefront_core::calendar::generate_seed_entries;
/// use chrono::NaiveDate;
///
/// let center = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let entries = generate_seed_entries(center, 20);
///
/// assert_eq!(entries.len(), 20);
/// ```
pub fn generate_seed_entries(center_date: NaiveDate, count: u32) -> Vec<Entry> {
    let multi_day_count = (count as f32 * 0.10).ceil() as u32;
    let all_day_count = (count as f32 * 0.15).ceil() as u32;
    let recurring_count = (count as f32 * 0.25).ceil() as u32;
    let timed_count = (count as f32 * 0.30).ceil() as u32;
    let task_count =
        count.saturating_sub(multi_day_count + all_day_count + recurring_count + timed_count);

    let mut entries = Vec::with_capacity(count as usize);

    let multi_day_titles = ["Family Leave", "Field Training", "PCS Move", "Spring Break"];
    for i in 0..multi_day_count {
        let start = shift_days(center_date, i64::from(i) * 5 - 4);
        let title = multi_day_titles[i as usize % multi_day_titles.len()];
        entries.push(
            Entry::all_day_span(title, start, shift_days(start, 2)).with_color("#8b5cf6"),
        );
    }

    let all_day_titles = ["Payday", "Federal Holiday", "Unit Family Day", "School Picture Day"];
    for i in 0..all_day_count {
        let date = shift_days(center_date, i64::from(i) * 3 - 2);
        let title = all_day_titles[i as usize % all_day_titles.len()];
        entries.push(Entry::all_day(title, date).with_color("#10b981"));
    }

    let sunday = week_start(center_date);
    for i in 0..recurring_count {
        let date = shift_days(sunday, 1 + i64::from(i % 5));
        let start = at_hour(date, 7 + i % 6);
        let entry = match i % 4 {
            0 => Entry::event("Morning PT", start, lasting(start, Duration::hours(1)))
                .with_recurrence(Recurrence::weekly().on_days([1, 3, 5])),
            1 => Entry::event(
                "Call with deployed spouse",
                start,
                lasting(start, Duration::minutes(30)),
            )
                .with_recurrence(Recurrence::daily().every(2)),
            2 => Entry::event("FRG meeting", start, lasting(start, Duration::hours(2)))
                .with_recurrence(Recurrence::monthly())
                .with_location("Community Center"),
            _ => Entry::all_day("Anniversary", date).with_recurrence(Recurrence::yearly()),
        };
        entries.push(entry.with_color("#3b82f6"));
    }

    let timed_titles = [
        "Dental Appointment",
        "TRICARE Enrollment",
        "Housing Inspection",
        "Parent-Teacher Conference",
        "Legal Assistance",
        "Finance Counseling",
    ];
    for i in 0..timed_count {
        let date = shift_days(center_date, i64::from(i % 7) - 3);
        let start = at_hour(date, 9 + i % 8);
        let title = timed_titles[i as usize % timed_titles.len()];
        let end = lasting(start, Duration::hours(1));
        entries.push(Entry::event(title, start, end).with_color("#f97316"));
    }

    let task_titles = [
        "Renew ID Card",
        "Update DEERS",
        "Mail Care Package",
        "Submit Leave Request",
        "File Travel Voucher",
    ];
    for i in 0..task_count {
        let date = shift_days(center_date, i64::from(i % 5) - 2);
        let title = task_titles[i as usize % task_titles.len()];
        let mut task = Entry::task(title, at_hour(date, 17)).with_completed(i % 4 == 1);
        if i % 3 == 0 {
            let rule = Recurrence::weekly().until_date(shift_days(date, 28));
            task = task.with_recurrence(rule);
        }
        entries.push(task);
    }

    // Rounding up can overshoot small counts.
    entries.truncate(count as usize);
    entries
}
