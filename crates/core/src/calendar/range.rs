//! View windows: which dates a calendar view materializes for an anchor date.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Calendar view modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

/// A range of whole calendar days, `[start, end)`.
///
/// The year view's closed `[Jan 1, Dec 31]` range is represented with
/// `end` = Jan 1 of the following year, so [`DateWindow::last_day`] is Dec 31
/// and every moment of Dec 31 is inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    /// First day after the window.
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Window covering `first` through `last`, inclusive.
    pub fn inclusive(first: NaiveDate, last: NaiveDate) -> Self {
        Self::new(first, shift_days(last, 1))
    }

    /// Midnight at the start of the window.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Midnight at the (exclusive) end of the window.
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    /// The last day inside the window.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    pub fn contains_day(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Number of days in the window.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// Every day in the window, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(|d| *d < end).collect()
    }
}

impl CalendarView {
    /// The window this view materializes around `anchor`.
    ///
    /// - day: the anchor's day.
    /// - week: the Sunday on or before the anchor, plus 7 days.
    /// - month: from 7 days before the first of the month to 13 days after
    ///   the first of the next month, widened when needed so the 42 cells of
    ///   the Sunday-start six-row grid are always inside.
    /// - year: Jan 1 through Dec 31.
    pub fn window(self, anchor: NaiveDate) -> DateWindow {
        match self {
            CalendarView::Day => DateWindow::new(anchor, shift_days(anchor, 1)),
            CalendarView::Week => {
                let start = week_start(anchor);
                DateWindow::new(start, shift_days(start, 7))
            }
            CalendarView::Month => {
                let first = first_of_month(anchor);
                let next_first = first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                let grid_end = shift_days(week_start(first), 42);
                DateWindow::new(
                    shift_days(first, -7),
                    shift_days(next_first, 13).max(grid_end),
                )
            }
            CalendarView::Year => {
                let jan_first = shift_days(anchor, -i64::from(anchor.ordinal0()));
                let next_jan_first = jan_first
                    .checked_add_months(Months::new(12))
                    .unwrap_or(NaiveDate::MAX);
                DateWindow::new(jan_first, next_jan_first)
            }
        }
    }

    /// Moves `anchor` by `steps` view periods (negative moves backwards).
    /// Month and year steps clamp to the target month's last day.
    pub fn navigate(self, anchor: NaiveDate, steps: i32) -> NaiveDate {
        let months = |n: u32| {
            if steps >= 0 {
                anchor.checked_add_months(Months::new(n))
            } else {
                anchor.checked_sub_months(Months::new(n))
            }
        };
        let magnitude = steps.unsigned_abs();
        let moved = match self {
            CalendarView::Day => Some(shift_days(anchor, i64::from(steps))),
            CalendarView::Week => Some(shift_days(anchor, i64::from(steps) * 7)),
            CalendarView::Month => months(magnitude),
            CalendarView::Year => magnitude.checked_mul(12).and_then(months),
        };
        moved.unwrap_or(anchor)
    }

    /// Header text for the view, e.g. "March 2024" or "Mar 31 – Apr 6, 2024".
    pub fn title(self, anchor: NaiveDate) -> String {
        match self {
            CalendarView::Day => anchor.format("%A, %B %-d, %Y").to_string(),
            CalendarView::Week => {
                let days = week_days(anchor);
                let (first, last) = (days[0], days[6]);
                if first.month() == last.month() {
                    format!(
                        "{} {} \u{2013} {}, {}",
                        first.format("%B"),
                        first.day(),
                        last.day(),
                        first.year()
                    )
                } else {
                    format!(
                        "{} {} \u{2013} {} {}, {}",
                        first.format("%b"),
                        first.day(),
                        last.format("%b"),
                        last.day(),
                        last.year()
                    )
                }
            }
            CalendarView::Month => anchor.format("%B %Y").to_string(),
            CalendarView::Year => anchor.year().to_string(),
        }
    }
}

/// Shorthand for `view.window(anchor)`.
pub fn resolve_window(view: CalendarView, anchor: NaiveDate) -> DateWindow {
    view.window(anchor)
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    shift_days(date, -i64::from(date.weekday().num_days_from_sunday()))
}

/// The seven days (Sunday to Saturday) of the week containing `date`.
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let start = week_start(date);
    std::array::from_fn(|i| shift_days(start, i as i64))
}

/// The 42 days of a Sunday-start six-row month grid.
///
/// Returns an empty list when `year`/`month` is not a valid month.
pub fn month_grid_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let start = week_start(first);
    (0..42).map(|offset| shift_days(start, offset)).collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    shift_days(date, -i64::from(date.day0()))
}

/// Adds `days` to `date`, saturating at chrono's date range.
pub(crate) fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}
