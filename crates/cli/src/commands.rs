//! Command implementations, generic over the entry repository.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use homefront_core::calendar::{
    expand_all, expand_with, filter_by_type, generate_seed_entries, holiday_entries,
    month_grid_days, pending_tasks, validate_entry, write_calendar, CalendarView, DateWindow,
    DayData, DayQueryIndex, EntryType, ExpandOptions, Occurrence,
};
use homefront_core::storage::EntryRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CliError, Result};

/// A resolved view with its per-day contents.
#[derive(Debug, Clone, Serialize)]
pub struct Agenda {
    pub view: CalendarView,
    pub anchor: NaiveDate,
    pub title: String,
    pub window: DateWindow,
    pub days: Vec<DayData>,
}

impl Agenda {
    pub fn occurrence_count(&self) -> usize {
        self.days.iter().map(DayData::entry_count).sum()
    }
}

/// Recurrence summary for one recurring entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrenceSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// Parameters for [`view_agenda`].
#[derive(Debug, Clone, Copy)]
pub struct ViewRequest {
    pub view: CalendarView,
    pub anchor: NaiveDate,
    pub today: NaiveDate,
    pub entry_type: Option<EntryType>,
    /// Add federal holidays falling inside the window.
    pub holidays: bool,
    /// Keep only tasks that are not completed.
    pub pending_only: bool,
}

/// Loads the user's entries, expands them over the view's window and
/// groups the occurrences by day.
///
/// Month views list the 42 grid days; other views list every day of their
/// window. Holidays are added before the type and pending filters run.
pub async fn view_agenda<R: EntryRepository>(
    repo: &R,
    user_id: Uuid,
    request: ViewRequest,
    options: &ExpandOptions,
) -> Result<Agenda> {
    let mut entries = repo.list_entries(user_id).await?;
    let window = request.view.window(request.anchor);
    if request.holidays {
        entries.extend(holiday_entries(&window));
    }

    let mut occurrences = expand_all(&entries, &window, options);
    if let Some(entry_type) = request.entry_type {
        occurrences = filter_by_type(&occurrences, entry_type)
            .into_iter()
            .cloned()
            .collect();
    }
    if request.pending_only {
        occurrences = pending_tasks(&occurrences).into_iter().cloned().collect();
    }
    tracing::debug!(
        entries = entries.len(),
        occurrences = occurrences.len(),
        window_start = %window.start,
        window_end = %window.end,
        "expanded view window"
    );

    let dates = match request.view {
        CalendarView::Month => month_grid_days(request.anchor.year(), request.anchor.month()),
        _ => window.days(),
    };
    let days = DayQueryIndex::new(&occurrences).day_data(&dates, request.today);

    Ok(Agenda {
        view: request.view,
        anchor: request.anchor,
        title: request.view.title(request.anchor),
        window,
        days,
    })
}

/// Expands a single entry over `first..=last`.
pub async fn expand_entry<R: EntryRepository>(
    repo: &R,
    id: Uuid,
    first: NaiveDate,
    last: NaiveDate,
    options: &ExpandOptions,
) -> Result<Vec<Occurrence>> {
    if last < first {
        return Err(CliError::InvalidInput(format!(
            "end date {last} is before start date {first}"
        )));
    }
    let entry = repo.get_entry(id).await?.ok_or_else(|| CliError::NotFound {
        resource: format!("entry {id}"),
    })?;

    let window = DateWindow::inclusive(first, last);
    Ok(expand_with(
        &entry,
        window.start_datetime(),
        window.end_datetime(),
        options,
    ))
}

/// Describes the rule of every recurring entry the user owns.
pub async fn describe_entries<R: EntryRepository>(
    repo: &R,
    user_id: Uuid,
) -> Result<Vec<RecurrenceSummary>> {
    let entries = repo.list_entries(user_id).await?;
    Ok(entries
        .iter()
        .filter_map(|entry| {
            let (_, rule) = entry.active_recurrence()?;
            Some(RecurrenceSummary {
                id: entry.id,
                title: entry.title.clone(),
                description: rule.describe(),
            })
        })
        .collect())
}

/// Renders every entry the user owns as an iCalendar document.
pub async fn export_ical<R: EntryRepository>(
    repo: &R,
    user_id: Uuid,
    stamp: NaiveDateTime,
) -> Result<String> {
    let entries = repo.list_entries(user_id).await?;
    tracing::debug!(entries = entries.len(), %user_id, "exporting calendar");
    Ok(write_calendar(&entries, stamp))
}

/// Generates `count` demo entries around `anchor` and stores them for the
/// user. Returns how many were written.
pub async fn seed_entries<R: EntryRepository>(
    repo: &R,
    user_id: Uuid,
    anchor: NaiveDate,
    count: u32,
) -> Result<usize> {
    let entries = generate_seed_entries(anchor, count);
    for entry in &entries {
        validate_entry(entry)?;
        repo.create_entry(user_id, entry).await?;
    }
    tracing::info!(count = entries.len(), %user_id, "seeded demo entries");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use homefront_core::calendar::{Entry, FallbackPolicy, Recurrence, HOLIDAY_COLOR};
    use homefront_core::storage::InMemoryRepository;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        make_date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn pt_session() -> Entry {
        Entry::event(
            "Morning PT",
            make_datetime(2024, 1, 1, 6, 0),
            make_datetime(2024, 1, 1, 7, 0),
        )
        .with_recurrence(Recurrence::weekly().on_days([1, 3, 5]))
    }

    #[tokio::test]
    async fn test_view_agenda_week() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_entries(
            user_id,
            [
                pt_session(),
                Entry::all_day("Payday", make_date(2024, 1, 12)),
                Entry::task("Renew ID card", make_datetime(2024, 1, 10, 17, 0)),
            ],
        );
        let today = make_date(2024, 1, 10);
        let request = ViewRequest {
            view: CalendarView::Week,
            anchor: today,
            today,
            entry_type: None,
            holidays: false,
            pending_only: false,
        };

        let agenda = view_agenda(&repo, user_id, request, &ExpandOptions::default())
            .await
            .unwrap();

        assert_eq!(agenda.days.len(), 7);
        assert_eq!(agenda.days[0].date, make_date(2024, 1, 7));
        // Three PT sessions, payday and the task.
        assert_eq!(agenda.occurrence_count(), 5);

        let wednesday = &agenda.days[3];
        assert!(wednesday.is_today);
        let titles: Vec<&str> = wednesday.timed.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Morning PT", "Renew ID card"]);
        assert_eq!(agenda.days[5].all_day[0].title, "Payday");
    }

    #[tokio::test]
    async fn test_view_agenda_filters_type() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_entries(
            user_id,
            [
                pt_session(),
                Entry::task("Renew ID card", make_datetime(2024, 1, 10, 17, 0)),
            ],
        );
        let request = ViewRequest {
            view: CalendarView::Day,
            anchor: make_date(2024, 1, 10),
            today: make_date(2024, 1, 1),
            entry_type: Some(EntryType::Task),
            holidays: false,
            pending_only: false,
        };

        let agenda = view_agenda(&repo, user_id, request, &ExpandOptions::default())
            .await
            .unwrap();

        assert_eq!(agenda.days.len(), 1);
        assert_eq!(agenda.occurrence_count(), 1);
        assert_eq!(agenda.days[0].timed[0].title, "Renew ID card");
    }

    #[tokio::test]
    async fn test_view_agenda_month_uses_grid() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_entries(
            user_id,
            [Entry::all_day("Spring Break", make_date(2024, 4, 2))],
        );
        let request = ViewRequest {
            view: CalendarView::Month,
            anchor: make_date(2024, 3, 15),
            today: make_date(2024, 3, 15),
            entry_type: None,
            holidays: false,
            pending_only: false,
        };

        let agenda = view_agenda(&repo, user_id, request, &ExpandOptions::default())
            .await
            .unwrap();

        assert_eq!(agenda.title, "March 2024");
        assert_eq!(agenda.days.len(), 42);
        assert_eq!(agenda.days[0].date, make_date(2024, 2, 25));
        // April 2 is in the trailing grid row.
        assert_eq!(agenda.occurrence_count(), 1);
    }

    #[tokio::test]
    async fn test_view_agenda_with_holidays() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_entries(
            user_id,
            [Entry::task("Order turkey", make_datetime(2024, 11, 25, 12, 0))],
        );
        let request = ViewRequest {
            view: CalendarView::Week,
            anchor: make_date(2024, 11, 28),
            today: make_date(2024, 11, 28),
            entry_type: None,
            holidays: true,
            pending_only: false,
        };

        let agenda = view_agenda(&repo, user_id, request, &ExpandOptions::default())
            .await
            .unwrap();

        let thursday = &agenda.days[4];
        assert_eq!(thursday.date, make_date(2024, 11, 28));
        assert_eq!(thursday.all_day[0].title, "Thanksgiving Day");
        assert_eq!(thursday.all_day[0].color.as_deref(), Some(HOLIDAY_COLOR));
        assert_eq!(agenda.occurrence_count(), 2);

        let without = ViewRequest {
            holidays: false,
            ..request
        };
        let agenda = view_agenda(&repo, user_id, without, &ExpandOptions::default())
            .await
            .unwrap();
        assert_eq!(agenda.occurrence_count(), 1);
    }

    #[tokio::test]
    async fn test_view_agenda_pending_only() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_entries(
            user_id,
            [
                pt_session(),
                Entry::task("Renew ID card", make_datetime(2024, 1, 10, 17, 0)),
                Entry::task("Mail care package", make_datetime(2024, 1, 10, 12, 0))
                    .with_completed(true),
            ],
        );
        let request = ViewRequest {
            view: CalendarView::Day,
            anchor: make_date(2024, 1, 10),
            today: make_date(2024, 1, 10),
            entry_type: None,
            holidays: false,
            pending_only: true,
        };

        let agenda = view_agenda(&repo, user_id, request, &ExpandOptions::default())
            .await
            .unwrap();

        let titles: Vec<&str> = agenda.days[0]
            .timed
            .iter()
            .map(|o| o.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Renew ID card"]);
    }

    #[tokio::test]
    async fn test_export_ical() {
        let user_id = Uuid::new_v4();
        let entry = pt_session();
        let id = entry.id;
        let repo = InMemoryRepository::with_entries(
            user_id,
            [entry, Entry::all_day("Payday", make_date(2024, 1, 12))],
        );

        let ics = export_ical(&repo, user_id, make_datetime(2024, 1, 1, 0, 0))
            .await
            .unwrap();

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 2);
        assert!(ics.contains(&format!("UID:{id}@homefront")));
        assert!(ics.contains("RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR"));

        let empty = export_ical(&repo, Uuid::new_v4(), make_datetime(2024, 1, 1, 0, 0))
            .await
            .unwrap();
        assert!(!empty.contains("BEGIN:VEVENT"));
    }

    #[tokio::test]
    async fn test_expand_entry_inclusive_range() {
        let user_id = Uuid::new_v4();
        let entry = pt_session();
        let id = entry.id;
        let repo = InMemoryRepository::with_entries(user_id, [entry]);

        let occurrences = expand_entry(
            &repo,
            id,
            make_date(2024, 1, 8),
            make_date(2024, 1, 12),
            &ExpandOptions::default(),
        )
        .await
        .unwrap();

        let days: Vec<NaiveDate> = occurrences.iter().map(|o| o.start_date()).collect();
        assert_eq!(
            days,
            vec![
                make_date(2024, 1, 8),
                make_date(2024, 1, 10),
                make_date(2024, 1, 12)
            ]
        );
    }

    #[tokio::test]
    async fn test_expand_entry_errors() {
        let repo = InMemoryRepository::new();
        let options = ExpandOptions {
            max_iterations: 10,
            fallback: FallbackPolicy::Strict,
        };

        let missing = expand_entry(
            &repo,
            Uuid::new_v4(),
            make_date(2024, 1, 1),
            make_date(2024, 1, 2),
            &options,
        )
        .await;
        assert!(matches!(missing, Err(CliError::NotFound { .. })));

        let backwards = expand_entry(
            &repo,
            Uuid::new_v4(),
            make_date(2024, 1, 2),
            make_date(2024, 1, 1),
            &options,
        )
        .await;
        assert!(matches!(backwards, Err(CliError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_describe_entries_skips_one_off() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryRepository::with_entries(
            user_id,
            [
                pt_session(),
                Entry::all_day("Payday", make_date(2024, 1, 12)),
            ],
        );

        let summaries = describe_entries(&repo, user_id).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].title, "Morning PT");
        assert_eq!(summaries[0].description, "Weekly on Mon, Wed, Fri");
    }

    #[tokio::test]
    async fn test_seed_entries() {
        let repo = InMemoryRepository::new();
        let user_id = Uuid::new_v4();

        let written = seed_entries(&repo, user_id, make_date(2024, 6, 15), 12)
            .await
            .unwrap();

        assert_eq!(written, 12);
        assert_eq!(repo.list_entries(user_id).await.unwrap().len(), 12);
    }
}
