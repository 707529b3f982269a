//! `slots` CLI — compute booking slots and bookable dates from JSON requests.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for one day (stdin → stdout)
//! cat day.json | slots compute
//!
//! # Slots from file to file, with a pinned clock
//! slots --now 2026-03-13T08:00:00Z compute -i day.json -o slots.json
//!
//! # Is one date selectable?
//! slots bookable -i event.json
//!
//! # Bookable dates of a month
//! slots calendar --from 2026-03-01 --to 2026-03-31 -i event.json
//!
//! # Debug logging (or RUST_LOG=slot_engine=trace)
//! slots -v compute -i day.json
//! ```
//!
//! `compute` reads a `SlotQuery`; `bookable` and `calendar` read a
//! `BookableQuery`. A request without `now` is evaluated at `--now`, or at the
//! wall clock when that is absent too.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::debug;
use serde_json::Value;
use slot_engine::{BookableQuery, SlotQuery};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "slots", version, about = "Booking slot computation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Clock used for requests that do not carry `now` (RFC 3339)
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the bookable slots of one invitee day
    Compute {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check whether the request's date can be booked
    Bookable {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List the bookable dates in an inclusive date range
    Calendar {
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Compute { input, output } => {
            let request = read_request(input.as_deref(), now)?;
            let query: SlotQuery =
                serde_json::from_value(request).context("Invalid slot request")?;
            let slots = slot_engine::compute_slots(&query).context("Failed to compute slots")?;
            let mut json = serde_json::to_string_pretty(&slots)?;
            json.push('\n');
            write_output(output.as_deref(), &json)?;
        }
        Commands::Bookable { input } => {
            let request = read_request(input.as_deref(), now)?;
            let query: BookableQuery =
                serde_json::from_value(request).context("Invalid bookable request")?;
            let bookable =
                slot_engine::is_date_bookable(&query).context("Failed to evaluate date")?;
            println!("{}", bookable);
        }
        Commands::Calendar {
            from,
            to,
            input,
            output,
        } => {
            if from > to {
                anyhow::bail!("--from {} is after --to {}", from, to);
            }
            let request = read_request(input.as_deref(), now)?;
            let query: BookableQuery =
                serde_json::from_value(request).context("Invalid bookable request")?;
            let dates = slot_engine::bookable_dates(&query, from, to)
                .context("Failed to evaluate dates")?;
            let text: String = dates.iter().map(|d| format!("{}\n", d)).collect();
            write_output(output.as_deref(), &text)?;
        }
    }

    Ok(())
}

/// Install the stderr logger. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Read the JSON request and fill in `now` when the request leaves it out.
fn read_request(path: Option<&str>, now: DateTime<Utc>) -> Result<Value> {
    let raw = read_input(path)?;
    let mut request: Value = serde_json::from_str(&raw).context("Request is not valid JSON")?;
    let Some(object) = request.as_object_mut() else {
        anyhow::bail!("Request must be a JSON object");
    };
    if !object.contains_key("now") {
        debug!("request has no clock; using {}", now);
        object.insert("now".to_string(), Value::String(now.to_rfc3339()));
    }
    Ok(request)
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
            print!("{}", content);
        }
    }
    Ok(())
}
