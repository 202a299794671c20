//! homefront CLI entry point.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use homefront_cli::cli::{Cli, Commands, OutputFormat};
use homefront_cli::commands::{self, ViewRequest};
use homefront_cli::output::{format_output, pretty};
use homefront_cli::{Config, JsonFileRepository};
use homefront_core::calendar::CalendarView;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homefront_cli=info,homefront_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let options = config.expand_options();
    let path = cli.entries.clone().unwrap_or(config.entries_path);
    let repo = JsonFileRepository::new(path);
    let today = cli.resolve_today();
    tracing::debug!(path = %repo.path().display(), user = %cli.user, "using entries file");

    match cli.command {
        Commands::View {
            view,
            date,
            offset,
            entry_type,
            holidays,
            pending,
        } => {
            let view: CalendarView = view.into();
            let anchor = view.navigate(date.unwrap_or(today), offset);
            let request = ViewRequest {
                view,
                anchor,
                today,
                entry_type: entry_type.map(Into::into),
                holidays,
                pending_only: pending,
            };
            let agenda = commands::view_agenda(&repo, cli.user, request, &options).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&agenda, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_agenda(&agenda)),
            }
        }
        Commands::Expand { id, start, end } => {
            let occurrences = commands::expand_entry(&repo, id, start, end, &options).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&occurrences, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_occurrences(&occurrences)),
            }
        }
        Commands::Describe => {
            let summaries = commands::describe_entries(&repo, cli.user).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&summaries, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_summaries(&summaries)),
            }
        }
        Commands::Ical { output } => {
            let ics = commands::export_ical(&repo, cli.user, Utc::now().naive_utc()).await?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, ics).await?;
                    if !cli.quiet {
                        println!("Wrote calendar to {}", path.display());
                    }
                }
                None => print!("{ics}"),
            }
        }
        Commands::Seed { count, date } => {
            let written =
                commands::seed_entries(&repo, cli.user, date.unwrap_or(today), count).await?;
            if !cli.quiet {
                println!("Wrote {} entries to {}", written, repo.path().display());
            }
        }
    }

    Ok(())
}
