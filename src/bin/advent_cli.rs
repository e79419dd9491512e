//! CLI tool for advent - prints the calendar overlay for a date
//!
//! Usage:
//!   advent_cli                              # Today, JSON to stdout
//!   advent_cli --test-day 10 --format grid  # Forced December 10th as a grid
//!   advent_cli --month 12 --day 3 -o out.json

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use advent::config::CalendarConfig;
use advent::layout::build_overlay;
use advent::render::{render_calendar, TextBackend};
use advent::types::{Bounds, CalendarDate};
use advent::unlock::{parse_test_day, resolve_state, Clock, FixedClock, SystemClock, TestOverride};
use advent::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Grid,
}

/// Print the advent calendar overlay view-model.
#[derive(Debug, Parser)]
#[command(name = "advent_cli", version)]
struct Args {
    /// Force a December day, parsed like the `test_day` query parameter
    #[arg(long)]
    test_day: Option<String>,

    /// Month (1-12) for a fixed clock; requires --day
    #[arg(long, requires = "day", value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Day of month for a fixed clock; requires --month
    #[arg(long, requires = "month", value_parser = clap::value_parser!(u32).range(1..=31))]
    day: Option<u32>,

    /// Container width in CSS pixels
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Container height in CSS pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// JSON configuration file (partial configs are filled with defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => CalendarConfig::from_json(&fs::read_to_string(path)?)?,
        None => CalendarConfig::default(),
    };

    let clock: Box<dyn Clock> = match (args.month, args.day) {
        (Some(month), Some(day)) => Box::new(FixedClock(CalendarDate::new(month - 1, day))),
        _ => Box::new(SystemClock),
    };

    let test_override = match args.test_day.as_deref() {
        Some(raw) => match parse_test_day(raw) {
            Some(day) => Some(TestOverride::url(day)),
            None => {
                tracing::warn!(raw, "ignoring non-numeric --test-day");
                None
            }
        },
        None => None,
    };

    let state = resolve_state(test_override, clock.as_ref());
    tracing::info!(day = state.day(), month = state.month(), source = ?state.source(), "resolved state");

    let view = build_overlay(
        &state,
        &config.grid,
        &config.assets,
        Bounds::new(args.width, args.height),
    );

    let rendered = match args.format {
        Format::Json => serde_json::to_string_pretty(&view)?,
        Format::Grid => {
            let mut backend = TextBackend::new();
            render_calendar(&mut backend, &view)?;
            backend.into_output()
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

