use chrono::{Local, NaiveDate};
use clap::Parser;
use habitlog::application::{init::init, ConfigService, HabitTracker};
use habitlog::cli::{
    format_entry_list, format_import_outcome, format_stats, format_streak_chart, Cli, Commands,
    ExportFormat,
};
use habitlog::domain::day_ref::parse_iso_date;
use habitlog::domain::{DayReference, Goal, HabitEntry, HabitStatus, ValidatedImport};
use habitlog::error::{HabitError, Result};
use habitlog::infrastructure::{FileStorage, FileSystemRepository, HabitRepository};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("HABITLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let today = resolve_today(cli.today.as_deref())?;

    match cli.command {
        Some(Commands::Init { path, name }) => {
            let config = init(&path, name)?;
            println!("Initialized habitlog tracker at {}", path.display());
            println!("Habit: {}", config.name);
            Ok(())
        }
        Some(Commands::Log { status, day, notes }) => {
            log_day(status.into(), &day, notes, today)
        }
        Some(Commands::Done { day, notes }) => log_day(HabitStatus::Completed, &day, notes, today),
        Some(Commands::Miss { day, notes }) => log_day(HabitStatus::Missed, &day, notes, today),
        Some(Commands::Stats { json }) => {
            let (repo, tracker) = open_tracker()?;
            let stats = tracker.statistics(today);
            if json {
                let text = serde_json::to_string_pretty(&stats)
                    .map_err(|e| HabitError::Storage(format!("Failed to serialize statistics: {}", e)))?;
                println!("{}", text);
            } else {
                let config = repo.load_config()?;
                print!("{}", format_stats(&config.name, &stats));
            }
            Ok(())
        }
        Some(Commands::History { limit }) => {
            let (_, tracker) = open_tracker()?;
            let stats = tracker.statistics(today);
            println!("Entries");
            println!("{}", format_entry_list(&tracker.entries().snapshot(), limit).trim_end());
            println!();
            println!("Streaks");
            println!("{}", format_streak_chart(&stats.streak_history).trim_end());
            Ok(())
        }
        Some(Commands::Goal { value }) => {
            let (_, mut tracker) = open_tracker()?;
            match value {
                Some(v) => {
                    let goal = tracker.set_goal(Goal::from_input(&v))?;
                    if goal.is_set() {
                        println!("Goal set to {}", goal);
                    } else {
                        println!("Goal cleared");
                    }
                }
                None => println!("Goal: {}", tracker.goal()),
            }
            Ok(())
        }
        Some(Commands::Import { file, yes }) => {
            let (_, mut tracker) = open_tracker()?;
            let payload = read_backup(&file)?;
            let validated = ValidatedImport::parse(&payload)?;

            let conflicts = validated
                .entries
                .iter()
                .filter(|e| tracker.entries().contains(e.date))
                .count();
            let proceed = yes
                || confirm(&format!(
                    "Import {} entries from {} ({} existing days will be overwritten) and set the goal to {}?",
                    validated.entries.len(),
                    file.display(),
                    conflicts,
                    validated.streak_goal
                ))?;

            let outcome = tracker.apply_import(validated, proceed)?;
            println!("{}", format_import_outcome(&outcome));
            Ok(())
        }
        Some(Commands::Export {
            format,
            streaks,
            output,
        }) => {
            let (_, tracker) = open_tracker()?;
            let content = match (format, streaks) {
                (ExportFormat::Json, false) => tracker.export_json()? + "\n",
                (ExportFormat::Csv, false) => tracker.export_entries_csv(),
                (ExportFormat::Csv, true) => tracker.export_streaks_csv(today),
                (ExportFormat::Json, true) => {
                    return Err(HabitError::Config(
                        "Streak history can only be exported as CSV (use --format csv)".to_string(),
                    ))
                }
            };
            write_export(output.as_deref(), &content)
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("name = {}", config.name);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: habitlog config [--list | <key> [<value>]]");
                println!("Valid keys: name, created");
                Ok(())
            }
        }
        None => {
            println!("habitlog - Daily habit tracker");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// `--today` wins over HABITLOG_TODAY, which wins over the local clock.
fn resolve_today(flag: Option<&str>) -> Result<NaiveDate> {
    match flag.map(str::to_string).or_else(|| std::env::var("HABITLOG_TODAY").ok()) {
        Some(value) => parse_iso_date(&value),
        None => Ok(Local::now().date_naive()),
    }
}

fn open_tracker() -> Result<(FileSystemRepository, HabitTracker<FileStorage>)> {
    let repo = FileSystemRepository::discover()?;
    let tracker = HabitTracker::open(repo.data_storage())?;
    Ok((repo, tracker))
}

fn log_day(
    status: HabitStatus,
    day: &[String],
    notes: Option<String>,
    today: NaiveDate,
) -> Result<()> {
    let date = if day.is_empty() {
        today
    } else {
        DayReference::parse(&day.join(" "))?.resolve(today)
    };

    let (_, mut tracker) = open_tracker()?;
    tracker.add_entry(HabitEntry::new(date, status, notes), today)?;

    println!("Logged {} as {}", date, status);
    println!(
        "Current streak: {}",
        tracker.statistics(today).current_streak
    );
    Ok(())
}

/// Read a backup file. Bytes that are not UTF-8 are a bad payload, not an IO failure.
fn read_backup(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => {
            HabitError::Format(format!("{} is not UTF-8 text", path.display()))
        }
        _ => HabitError::Io(e),
    })
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    println!();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn write_export(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("Exported to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
