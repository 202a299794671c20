//! Per-day lookups over a materialized occurrence list.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use super::types::{DayData, Occurrence};

/// Read-side view over the occurrences of the active window.
///
/// Results preserve the order of the underlying list.
#[derive(Debug, Clone, Copy)]
pub struct DayQueryIndex<'a> {
    occurrences: &'a [Occurrence],
}

impl<'a> DayQueryIndex<'a> {
    pub fn new(occurrences: &'a [Occurrence]) -> Self {
        Self { occurrences }
    }

    pub fn occurrences(&self) -> &'a [Occurrence] {
        self.occurrences
    }

    /// Occurrences touching `date`.
    pub fn occurrences_on(&self, date: NaiveDate) -> Vec<&'a Occurrence> {
        self.occurrences
            .iter()
            .filter(|occurrence| touches_day(occurrence, date))
            .collect()
    }

    /// All-day occurrences touching `date`.
    pub fn all_day_on(&self, date: NaiveDate) -> Vec<&'a Occurrence> {
        self.occurrences
            .iter()
            .filter(|occurrence| occurrence.all_day && touches_day(occurrence, date))
            .collect()
    }

    /// Timed occurrences starting on `date`.
    pub fn timed_on(&self, date: NaiveDate) -> Vec<&'a Occurrence> {
        self.occurrences
            .iter()
            .filter(|occurrence| !occurrence.all_day && touches_day(occurrence, date))
            .collect()
    }

    /// Builds a [`DayData`] per date. Timed occurrences are ordered by start
    /// time; all-day occurrences keep list order.
    pub fn day_data(&self, dates: &[NaiveDate], today: NaiveDate) -> Vec<DayData> {
        dates
            .iter()
            .map(|date| {
                let mut day = DayData::empty(*date, today);
                day.all_day = self.all_day_on(*date).into_iter().cloned().collect();
                day.timed = self.timed_on(*date).into_iter().cloned().collect();
                day.timed.sort_by_key(|occurrence| occurrence.start.time());
                day
            })
            .collect()
    }
}

/// Whether `occurrence` is shown on `date`.
///
/// All-day occurrences match every day their `[start, end]` span touches (an
/// absent end means the start day only). Timed occurrences match only the
/// day they start on, even when they run past midnight.
pub fn touches_day(occurrence: &Occurrence, date: NaiveDate) -> bool {
    if occurrence.all_day {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = date
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN))
            .unwrap_or(NaiveDateTime::MAX);
        occurrence.start < day_end && occurrence.effective_end() >= day_start
    } else {
        occurrence.start.date() == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::types::Entry;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        make_date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn sample() -> Vec<Occurrence> {
        let a = Entry::all_day_span(
            "Homecoming week",
            make_date(2024, 6, 1),
            make_date(2024, 6, 3),
        );
        let b = Entry::event(
            "Welcome home dinner",
            make_datetime(2024, 6, 2, 14, 0),
            make_datetime(2024, 6, 2, 15, 0),
        );
        vec![Occurrence::from_definition(&a), Occurrence::from_definition(&b)]
    }

    #[test]
    fn test_day_index_partition() {
        let occurrences = sample();
        let index = DayQueryIndex::new(&occurrences);
        let june_2 = make_date(2024, 6, 2);

        let all = index.occurrences_on(june_2);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "Homecoming week");
        assert_eq!(all[1].title, "Welcome home dinner");

        let all_day = index.all_day_on(june_2);
        assert_eq!(all_day.len(), 1);
        assert_eq!(all_day[0].title, "Homecoming week");

        let timed = index.timed_on(june_2);
        assert_eq!(timed.len(), 1);
        assert_eq!(timed[0].title, "Welcome home dinner");
    }

    #[test]
    fn test_all_day_span_boundaries() {
        let occurrences = sample();
        let index = DayQueryIndex::new(&occurrences);

        assert_eq!(index.all_day_on(make_date(2024, 5, 31)).len(), 0);
        assert_eq!(index.all_day_on(make_date(2024, 6, 1)).len(), 1);
        assert_eq!(index.all_day_on(make_date(2024, 6, 3)).len(), 1);
        assert_eq!(index.all_day_on(make_date(2024, 6, 4)).len(), 0);
    }

    #[test]
    fn test_all_day_without_end_is_single_day() {
        let entry = Entry::all_day("Payday", make_date(2024, 6, 14));
        let occurrences = vec![Occurrence::from_definition(&entry)];
        let index = DayQueryIndex::new(&occurrences);

        assert_eq!(index.occurrences_on(make_date(2024, 6, 14)).len(), 1);
        assert!(index.occurrences_on(make_date(2024, 6, 13)).is_empty());
        assert!(index.occurrences_on(make_date(2024, 6, 15)).is_empty());
    }

    #[test]
    fn test_timed_across_midnight_indexed_on_start_day() {
        let entry = Entry::event(
            "Overnight watch",
            make_datetime(2024, 6, 2, 22, 0),
            make_datetime(2024, 6, 3, 6, 0),
        );
        let occurrences = vec![Occurrence::from_definition(&entry)];
        let index = DayQueryIndex::new(&occurrences);

        assert_eq!(index.timed_on(make_date(2024, 6, 2)).len(), 1);
        assert!(index.timed_on(make_date(2024, 6, 3)).is_empty());
    }

    #[test]
    fn test_day_data_sorts_timed_and_flags_today() {
        let date = make_date(2024, 6, 2);
        let late = Entry::event(
            "Late",
            make_datetime(2024, 6, 2, 20, 0),
            make_datetime(2024, 6, 2, 21, 0),
        );
        let early = Entry::task("Early", make_datetime(2024, 6, 2, 7, 0));
        let occurrences = vec![
            Occurrence::from_definition(&late),
            Occurrence::from_definition(&early),
        ];
        let index = DayQueryIndex::new(&occurrences);

        let days = index.day_data(&[date, make_date(2024, 6, 3)], date);

        assert_eq!(days.len(), 2);
        assert!(days[0].is_today);
        assert_eq!(days[0].timed[0].title, "Early");
        assert_eq!(days[0].timed[1].title, "Late");
        assert!(!days[1].is_today);
        assert!(days[1].is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = DayQueryIndex::new(&[]);
        assert!(index.occurrences_on(make_date(2024, 6, 2)).is_empty());
    }
}
