use std::collections::BTreeSet;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::serde::{parse_until, Lenient};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// How often a recurring entry repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Parses the persisted frequency name. Returns None for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

/// The `{freq, interval, days_of_week, until}` record controlling how an
/// entry repeats.
///
/// Deserializing is lenient. An unknown or non-string `freq` stops the entry
/// from recurring, and so does an `interval` or `until` that cannot be
/// read, since dropping either would widen the rule. Weekday indices outside
/// 0..=6 are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecurrence")]
pub struct Recurrence {
    /// None when the stored rule is unusable; such a rule does not recur.
    pub freq: Option<Frequency>,
    pub interval: u32,
    /// Weekday indices, 0 = Sunday. Only used by weekly rules.
    pub days_of_week: Vec<u8>,
    /// Last moment an occurrence may start at, inclusive.
    pub until: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
struct RawRecurrence {
    #[serde(default)]
    freq: Option<Lenient<String>>,
    #[serde(default)]
    interval: Option<Lenient<i64>>,
    #[serde(default)]
    days_of_week: Option<Lenient<Vec<Lenient<i64>>>>,
    #[serde(default)]
    until: Option<Lenient<String>>,
}

impl From<RawRecurrence> for Recurrence {
    fn from(raw: RawRecurrence) -> Self {
        let mut malformed = Vec::new();

        let freq = raw
            .freq
            .and_then(Lenient::valid)
            .and_then(|name| Frequency::from_name(&name));

        let interval = match raw.interval {
            None => 1,
            Some(Lenient::Valid(n)) => u32::try_from(n.max(0)).unwrap_or(u32::MAX),
            Some(Lenient::Malformed) => {
                malformed.push("interval");
                1
            }
        };

        let days_of_week = raw
            .days_of_week
            .and_then(Lenient::valid)
            .unwrap_or_default()
            .into_iter()
            .filter_map(Lenient::valid)
            .filter_map(|d| u8::try_from(d).ok())
            .filter(|d| *d <= 6)
            .collect();

        let until = match raw.until {
            None => None,
            Some(Lenient::Valid(s)) if s.trim().is_empty() => None,
            Some(Lenient::Valid(s)) => {
                let parsed = parse_until(&s);
                if parsed.is_none() {
                    malformed.push("until");
                }
                parsed
            }
            Some(Lenient::Malformed) => {
                malformed.push("until");
                None
            }
        };

        let freq = if malformed.is_empty() {
            freq
        } else {
            tracing::debug!(fields = ?malformed, "unreadable recurrence fields, rule disabled");
            None
        };

        Self {
            freq,
            interval,
            days_of_week,
            until,
        }
    }
}

impl Recurrence {
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq: Some(freq),
            interval: 1,
            days_of_week: Vec::new(),
            until: None,
        }
    }

    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Repeats every `interval` periods.
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn on_days(mut self, days: impl IntoIterator<Item = u8>) -> Self {
        self.days_of_week = days.into_iter().collect();
        self
    }

    pub fn until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    /// Bounds the rule by a calendar date, covering that whole day.
    pub fn until_date(mut self, date: NaiveDate) -> Self {
        self.until = date.and_hms_opt(23, 59, 59);
        self
    }

    /// The interval to step by. Zero is treated as 1 so stepping always
    /// moves forward.
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    /// Valid weekday indices in ascending order, deduplicated.
    ///
    /// Empty unless the rule is weekly; an empty set means "the start's own
    /// weekday", whether the stored list was empty or absent.
    pub fn weekday_set(&self) -> BTreeSet<u8> {
        if self.freq != Some(Frequency::Weekly) {
            return BTreeSet::new();
        }
        self.days_of_week.iter().copied().filter(|d| *d <= 6).collect()
    }

    /// Human-readable summary, e.g. "Every 2 weeks on Mon, Wed".
    pub fn describe(&self) -> String {
        let Some(freq) = self.freq else {
            return "Does not repeat".to_string();
        };
        let n = self.effective_interval();
        let mut text = match (freq, n) {
            (Frequency::Daily, 1) => "Every day".to_string(),
            (Frequency::Daily, n) => format!("Every {n} days"),
            (Frequency::Weekly, n) => {
                let days = self.weekday_set();
                let base = if n == 1 {
                    "Weekly".to_string()
                } else {
                    format!("Every {n} weeks")
                };
                if days.is_empty() {
                    base
                } else {
                    let names: Vec<&str> = days.iter().map(|d| DAY_NAMES[*d as usize]).collect();
                    format!("{base} on {}", names.join(", "))
                }
            }
            (Frequency::Monthly, 1) => "Monthly".to_string(),
            (Frequency::Monthly, n) => format!("Every {n} months"),
            (Frequency::Yearly, 1) => "Yearly".to_string(),
            (Frequency::Yearly, n) => format!("Every {n} years"),
        };
        if let Some(until) = self.until {
            text.push_str(&format!(" until {}", until.date()));
        }
        text
    }
}

/// The `index`-th cursor position of a rule anchored at `anchor`.
///
/// Computed from the anchor rather than from the previous position, so a
/// day-of-month clamped in a short month recovers in the following months
/// (Jan 31 → Feb 29 → Mar 31). Monthly and yearly steps clamp to the target
/// month's last day. Returns None when the result leaves chrono's range.
pub fn occurrence_at(
    anchor: NaiveDateTime,
    freq: Frequency,
    interval: u32,
    index: u32,
) -> Option<NaiveDateTime> {
    let steps = interval.max(1).checked_mul(index)?;
    match freq {
        Frequency::Daily => anchor.checked_add_days(Days::new(u64::from(steps))),
        Frequency::Weekly => anchor.checked_add_days(Days::new(u64::from(steps) * 7)),
        Frequency::Monthly => anchor.checked_add_months(Months::new(steps)),
        Frequency::Yearly => anchor.checked_add_months(Months::new(steps.checked_mul(12)?)),
    }
}

/// The cursor position one period after `current`.
pub fn next_occurrence(
    current: NaiveDateTime,
    freq: Frequency,
    interval: u32,
) -> Option<NaiveDateTime> {
    occurrence_at(current, freq, interval, 1)
}
