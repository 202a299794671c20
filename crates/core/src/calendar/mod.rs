mod day_index;
mod error;
mod expand;
mod holidays;
mod ical;
mod mock_data;
mod operations;
mod range;
mod recurrence;
mod types;

pub use day_index::{touches_day, DayQueryIndex};
pub use error::EntryError;
pub use expand::{
    expand, expand_all, expand_with, ExpandOptions, FallbackPolicy, DEFAULT_MAX_ITERATIONS,
};
pub use holidays::{federal_holidays, holiday_entries, Holiday, HOLIDAY_COLOR};
pub use ical::{build_rrule, escape_text, write_calendar, CALENDAR_NAME, PRODUCT_ID};
pub use mock_data::generate_seed_entries;
pub use operations::{filter_by_type, pending_tasks, validate_entry};
pub use range::{
    month_grid_days, resolve_window, week_days, week_start, CalendarView, DateWindow,
};
pub use recurrence::{next_occurrence, occurrence_at, Frequency, Recurrence};
pub use types::{DayData, Entry, EntryType, Occurrence};
