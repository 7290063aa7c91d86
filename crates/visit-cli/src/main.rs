//! `opd-slots` CLI - doctor availability, slots, and booking checks from the
//! command line.
//!
//! Every subcommand reads one doctor schedule (the `weeklySchedule` /
//! `visitingHours` JSON of a doctor record) from `-i FILE` or stdin.
//!
//! ## Usage
//!
//! ```sh
//! # Is the doctor in on this date?
//! opd-slots available -i doctor.json --date 2026-10-18
//!
//! # Bookable slots for a date
//! opd-slots slots -i doctor.json --date 2026-10-19
//!
//! # Is this time bookable?
//! opd-slots check -i doctor.json --date 2026-10-19 --time 10:15
//!
//! # Next open day after today (or after --today)
//! opd-slots next -i doctor.json --today 2026-10-15
//!
//! # Validate a booking, correcting it where possible
//! opd-slots validate -i doctor.json --date 2026-10-18 --time 10:00 --format text
//!
//! # Two weeks of availability for a date picker
//! cat doctor.json | opd-slots calendar --from 2026-10-19 --days 14
//!
//! # Custom rules
//! opd-slots slots -i doctor.json --date 2026-10-19 --slot-minutes 15
//! opd-slots next -i doctor.json --rules rules.json
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{self, Read};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use visit_engine::display::format_time_range;
use visit_engine::{DoctorSchedule, SchedulingRules, TimeSlot};

#[derive(Parser)]
#[command(
    name = "opd-slots",
    version,
    about = "Doctor visiting-hours availability and appointment slots"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scheduling rules (slot_minutes, tolerance_minutes, horizon_days)
    #[arg(long, global = true)]
    rules: Option<String>,

    /// Override the slot width in minutes
    #[arg(long, global = true)]
    slot_minutes: Option<u32>,

    /// Override the time-matching tolerance in minutes
    #[arg(long, global = true)]
    tolerance_minutes: Option<u32>,

    /// Override the forward-search horizon in days
    #[arg(long, global = true)]
    horizon_days: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    /// Log engine decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Is the doctor open on a date?
    Available {
        /// Doctor schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// List bookable slots on a date
    Slots {
        /// Doctor schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Is a time bookable on a date?
    Check {
        /// Doctor schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// Find the next open day after today
    Next {
        /// Doctor schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reference date (YYYY-MM-DD); defaults to the local date
        #[arg(long)]
        today: Option<String>,
    },
    /// Validate a proposed booking, auto-correcting where possible
    Validate {
        /// Doctor schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Proposed date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Proposed time (HH:MM)
        #[arg(long)]
        time: String,
        /// Reference date (YYYY-MM-DD); defaults to the local date
        #[arg(long)]
        today: Option<String>,
    },
    /// Availability for consecutive days
    Calendar {
        /// Doctor schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Number of days
        #[arg(long, default_value_t = 14)]
        days: u32,
    },
}

#[derive(Serialize)]
struct AvailableOutput {
    date: NaiveDate,
    available: bool,
}

#[derive(Serialize)]
struct CheckOutput {
    date: NaiveDate,
    time: TimeSlot,
    available: bool,
}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    #[serde(flatten)]
    decision: &'a visit_engine::BookingDecision,
    corrected: bool,
    message: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Rejections exit 2 so scripts can tell them apart from usage errors.
    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when a booking was rejected.
fn run(cli: Cli) -> Result<bool> {
    let rules = build_rules(&cli)?;
    debug!(?rules, "scheduling rules");
    let format = cli.format;

    match cli.command {
        Commands::Available { input, date } => {
            let schedule = read_schedule(input.as_deref())?;
            let date = parse_date(&date)?;
            let available = visit_engine::is_date_available(date, Some(&schedule));
            match format {
                Format::Json => print_json(&AvailableOutput { date, available })?,
                Format::Text => println!(
                    "{} ({}): {}",
                    date,
                    visit_engine::Weekday::of(date),
                    if available { "open" } else { "closed" }
                ),
            }
        }
        Commands::Slots { input, date } => {
            let schedule = read_schedule(input.as_deref())?;
            let date = parse_date(&date)?;
            let result = visit_engine::check_availability(Some(&schedule), date, &rules);
            match format {
                Format::Json => print_json(&result)?,
                Format::Text => {
                    if !result.bookable {
                        println!("{}: closed", date);
                    } else if result.slots.is_empty() {
                        println!("{}: open, no visiting hours configured", date);
                    } else {
                        println!("{}", join_slots(&result.slots));
                    }
                }
            }
        }
        Commands::Check { input, date, time } => {
            let schedule = read_schedule(input.as_deref())?;
            let date = parse_date(&date)?;
            let time = parse_time(&time)?;
            let available = visit_engine::is_time_available(time, Some(&schedule), date, &rules);
            match format {
                Format::Json => print_json(&CheckOutput {
                    date,
                    time,
                    available,
                })?,
                Format::Text => println!(
                    "{} {}: {}",
                    date,
                    time,
                    if available { "available" } else { "unavailable" }
                ),
            }
        }
        Commands::Next { input, today } => {
            let schedule = read_schedule(input.as_deref())?;
            let today = resolve_today(today.as_deref())?;
            let next = visit_engine::get_next_available_date(Some(&schedule), today, &rules);
            match (format, next) {
                (Format::Json, next) => print_json(&next)?,
                (Format::Text, Some(next)) => {
                    let hours = next
                        .time_range
                        .as_ref()
                        .map(format_time_range)
                        .unwrap_or_else(|| "no visiting hours configured".to_string());
                    println!(
                        "{} ({}), {}",
                        next.date,
                        visit_engine::Weekday::of(next.date),
                        hours
                    );
                    if !next.slots.is_empty() {
                        println!("{}", join_slots(&next.slots));
                    }
                }
                (Format::Text, None) => println!(
                    "No open day in the next {} days",
                    rules.horizon_days
                ),
            }
        }
        Commands::Validate {
            input,
            date,
            time,
            today,
        } => {
            let schedule = read_schedule(input.as_deref())?;
            let date = parse_date(&date)?;
            let time = parse_time(&time)?;
            let today = resolve_today(today.as_deref())?;
            let decision =
                visit_engine::validate_and_correct(Some(&schedule), date, time, today, &rules);
            let message = decision.reason.as_ref().map(|r| r.to_string());
            match format {
                Format::Json => print_json(&ValidateOutput {
                    decision: &decision,
                    corrected: decision.corrected(),
                    message: message.clone(),
                })?,
                Format::Text => {
                    let label = match decision.status {
                        visit_engine::BookingStatus::Valid => "valid",
                        visit_engine::BookingStatus::AutoCorrected => "corrected",
                        visit_engine::BookingStatus::Rejected => "rejected",
                    };
                    println!("{}: {} {}", label, decision.date, decision.time);
                    if let Some(message) = message {
                        println!("{}", message);
                    }
                }
            }
            return Ok(decision.is_bookable());
        }
        Commands::Calendar { input, from, days } => {
            let schedule = read_schedule(input.as_deref())?;
            let from = parse_date(&from)?;
            let results = visit_engine::availability_calendar(Some(&schedule), from, days, &rules);
            match format {
                Format::Json => print_json(&results)?,
                Format::Text => {
                    for day in &results {
                        let slots = if !day.bookable {
                            "closed".to_string()
                        } else if day.slots.is_empty() {
                            "open".to_string()
                        } else {
                            join_slots(&day.slots)
                        };
                        println!(
                            "{} {:<9} {}",
                            day.date,
                            visit_engine::Weekday::of(day.date).to_string(),
                            slots
                        );
                    }
                }
            }
        }
    }

    Ok(true)
}

/// Defaults, then `--rules FILE`, then individual flags.
fn build_rules(cli: &Cli) -> Result<SchedulingRules> {
    let mut rules = match cli.rules.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rules file: {}", path))?;
            SchedulingRules::from_json(&raw)
                .with_context(|| format!("Failed to load rules from {}", path))?
        }
        None => SchedulingRules::default(),
    };

    if let Some(v) = cli.slot_minutes {
        rules.slot_minutes = v;
    }
    if let Some(v) = cli.tolerance_minutes {
        rules.tolerance_minutes = v;
    }
    if let Some(v) = cli.horizon_days {
        rules.horizon_days = v;
    }
    rules.validate().context("Invalid scheduling rules")?;
    Ok(rules)
}

fn read_schedule(path: Option<&str>) -> Result<DoctorSchedule> {
    let json = read_input(path)?;
    DoctorSchedule::from_json(&json).context("Failed to parse doctor schedule")
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(visit_engine::parse_date(s)?)
}

fn parse_time(s: &str) -> Result<TimeSlot> {
    Ok(TimeSlot::parse(s)?)
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

fn join_slots(slots: &[TimeSlot]) -> String {
    slots
        .iter()
        .map(TimeSlot::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
