//! `slots` CLI - query bookable slots and manage working windows from a JSON catalog.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for professional 1 and service 3 over the next 31 days
//! slots available -i catalog.json --professional 1 --service 3
//!
//! # Pin "now" for reproducible output
//! slots available -i catalog.json --professional 1 --service 3 --now 2026-03-16T10:30:00
//!
//! # Would this window overlap an existing one?
//! slots check-window -i catalog.json \
//!   --window '{"professional_id":1,"day_of_week":1,"start":"11:00","end":"13:00"}'
//!
//! # Store a window / a booking, writing the updated catalog
//! slots add-window -i catalog.json -o catalog.json --window '...'
//! slots book -i catalog.json --service 3 \
//!   --booking '{"professional_id":1,"date":"2026-03-16","start":"09:00","end":"09:30"}'
//! ```
//!
//! The catalog is read from stdin when `-i` is omitted.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{BookedInterval, Catalog, WorkingWindow};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Appointment slot availability and working-window conflict checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive written to stderr (e.g. "debug", "slot_engine=debug")
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable slots for a professional and service
    Available {
        /// Catalog JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        professional: u64,
        #[arg(long)]
        service: u64,
        /// Local date-time to search from, e.g. 2026-03-16T10:30:00 (defaults to the system clock)
        #[arg(long, env = "SLOTS_NOW", value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },
    /// Report whether a proposed working window overlaps a stored one
    CheckWindow {
        /// Catalog JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Proposed window as JSON
        #[arg(long)]
        window: String,
    },
    /// Store a new working window if it does not overlap a stored one
    AddWindow {
        /// Catalog JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Window as JSON
        #[arg(long)]
        window: String,
    },
    /// Record an appointment if its time is still free
    Book {
        /// Catalog JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Booked interval as JSON
        #[arg(long)]
        booking: String,
        #[arg(long)]
        service: u64,
    },
}

#[derive(Serialize)]
struct ConflictReport<'a> {
    conflict: bool,
    overlapping: Vec<&'a WorkingWindow>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Available {
            input,
            output,
            professional,
            service,
            now,
        } => {
            let catalog = read_catalog(input.as_deref())?;
            // The one place a wall clock is read.
            let now = now.unwrap_or_else(|| chrono::Local::now().naive_local());
            debug!(%now, professional, service, "computing available slots");

            let slots = catalog
                .find_available_slots(professional, service, now)
                .context("Failed to compute available slots")?;
            info!(count = slots.len(), "computed available slots");

            write_output(output.as_deref(), &serde_json::to_string_pretty(&slots)?)?;
        }
        Commands::CheckWindow { input, window } => {
            let catalog = read_catalog(input.as_deref())?;
            let proposed: WorkingWindow =
                serde_json::from_str(&window).context("Failed to parse --window JSON")?;

            let overlapping = slot_engine::find_conflicting_windows(&catalog.windows, &proposed)
                .context("Failed to check working window")?;
            let report = ConflictReport {
                conflict: !overlapping.is_empty(),
                overlapping,
            };

            write_output(None, &serde_json::to_string_pretty(&report)?)?;
        }
        Commands::AddWindow {
            input,
            output,
            window,
        } => {
            let mut catalog = read_catalog(input.as_deref())?;
            let proposed: WorkingWindow =
                serde_json::from_str(&window).context("Failed to parse --window JSON")?;

            catalog
                .add_window(proposed)
                .context("Failed to add working window")?;

            write_output(output.as_deref(), &catalog.to_json_pretty()?)?;
        }
        Commands::Book {
            input,
            output,
            booking,
            service,
        } => {
            let mut catalog = read_catalog(input.as_deref())?;
            let booking: BookedInterval =
                serde_json::from_str(&booking).context("Failed to parse --booking JSON")?;

            catalog
                .book(booking, service)
                .context("Failed to book appointment")?;

            write_output(output.as_deref(), &catalog.to_json_pretty()?)?;
        }
    }

    Ok(())
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("Invalid log filter: {}", filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
    Ok(())
}

/// Accepts `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DDTHH:MM` (a space may replace the `T`).
fn parse_now(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| format!("invalid date-time '{}', expected YYYY-MM-DDTHH:MM[:SS]", raw))
}

fn read_catalog(path: Option<&str>) -> Result<Catalog> {
    let json = read_input(path)?;
    Catalog::from_json(&json).context("Failed to parse catalog JSON")
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
