//! CLI command definitions.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use homefront_core::calendar::{CalendarView, EntryType};
use uuid::Uuid;

/// Command-line agenda for Homefront calendars.
#[derive(Debug, Parser)]
#[command(name = "homefront")]
#[command(version, about = "Command-line agenda for Homefront calendars", long_about = None)]
pub struct Cli {
    /// Entries file (JSON). Overrides HOMEFRONT_ENTRIES_PATH.
    #[arg(long, env = "HOMEFRONT_ENTRIES")]
    pub entries: Option<PathBuf>,

    /// User whose entries are read and written.
    #[arg(
        long,
        env = "HOMEFRONT_USER",
        default_value = "00000000-0000-0000-0000-000000000000"
    )]
    pub user: Uuid,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Date treated as today (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The `--today` override, or the local date.
    pub fn resolve_today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Calendar view selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl From<ViewArg> for CalendarView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Day => CalendarView::Day,
            ViewArg::Week => CalendarView::Week,
            ViewArg::Month => CalendarView::Month,
            ViewArg::Year => CalendarView::Year,
        }
    }
}

/// Entry type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryTypeArg {
    Event,
    Task,
}

impl From<EntryTypeArg> for EntryType {
    fn from(t: EntryTypeArg) -> Self {
        match t {
            EntryTypeArg::Event => EntryType::Event,
            EntryTypeArg::Task => EntryType::Task,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the agenda for a calendar view.
    View {
        /// View mode.
        #[arg(long, value_enum, default_value = "month")]
        view: ViewArg,
        /// Anchor date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Move the anchor by this many view periods.
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        offset: i32,
        /// Only show entries of this type.
        #[arg(long, value_enum)]
        entry_type: Option<EntryTypeArg>,
        /// Include US federal holidays.
        #[arg(long)]
        holidays: bool,
        /// Only show tasks that are not completed.
        #[arg(long)]
        pending: bool,
    },
    /// Expand one entry between two dates.
    Expand {
        /// Entry ID.
        id: Uuid,
        /// First day (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// Last day, inclusive (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,
    },
    /// Summarize the recurrence rules of recurring entries.
    Describe,
    /// Export the user's entries as an iCalendar file.
    Ical {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write demo entries for the user.
    Seed {
        /// Number of entries to generate.
        #[arg(long, default_value = "30")]
        count: u32,
        /// Center date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
