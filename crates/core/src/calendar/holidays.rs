//! US federal holidays as read-only all-day entries.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use uuid::Uuid;

use super::range::DateWindow;
use super::types::Entry;

/// Color tag carried by every holiday entry.
pub const HOLIDAY_COLOR: &str = "holiday";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holiday {
    pub name: &'static str,
    pub date: NaiveDate,
}

/// The eleven federal holidays observed in `year`, in calendar order.
///
/// Dates are the nominal ones; weekend observance shifts are not applied.
pub fn federal_holidays(year: i32) -> Vec<Holiday> {
    let fixed = |name, month, day| {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| Holiday { name, date })
    };
    let nth = |name, month, weekday, n| {
        NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
            .map(|date| Holiday { name, date })
    };

    [
        fixed("New Year's Day", 1, 1),
        nth("Martin Luther King Jr. Day", 1, Weekday::Mon, 3),
        nth("Presidents' Day", 2, Weekday::Mon, 3),
        last_monday(year, 5).map(|date| Holiday {
            name: "Memorial Day",
            date,
        }),
        fixed("Juneteenth", 6, 19),
        fixed("Independence Day", 7, 4),
        nth("Labor Day", 9, Weekday::Mon, 1),
        nth("Columbus Day", 10, Weekday::Mon, 2),
        fixed("Veterans Day", 11, 11),
        nth("Thanksgiving Day", 11, Weekday::Thu, 4),
        fixed("Christmas Day", 12, 25),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn last_monday(year: i32, month: u32) -> Option<NaiveDate> {
    let last = match month {
        12 => NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1)?,
    }
    .pred_opt()?;
    last.checked_sub_days(Days::new(u64::from(last.weekday().num_days_from_monday())))
}

/// Holiday entries for every holiday inside `window`.
///
/// Ids are derived from the date and name, so the same holiday gets the
/// same id on every call.
pub fn holiday_entries(window: &DateWindow) -> Vec<Entry> {
    let first_year = window.start.year();
    let last_year = window.last_day().year();

    (first_year..=last_year)
        .flat_map(federal_holidays)
        .filter(|holiday| window.contains_day(holiday.date))
        .map(|holiday| {
            let key = format!("holiday-{}-{}", holiday.date, holiday.name);
            Entry::all_day(holiday.name, holiday.date)
                .with_id(Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
                .with_color(HOLIDAY_COLOR)
                .with_description("Federal holiday")
        })
        .collect()
}
