mod report;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use report::{print_change, print_policies, print_refund};
use tour_pricing_core::{
    Booking, Clock, FixedClock, PolicyTable, QuoteEngine, SystemClock, TourOffer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tour-pricing", version)]
#[command(about = "Cancellation refunds and tour-change price differences for tour bookings")]
struct Args {
    /// JSON policy table to use instead of the standard schedule
    #[arg(long, global = true)]
    policy_file: Option<PathBuf>,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, global = true)]
    now: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Penalty and refund for cancelling a booking
    Refund {
        /// Total price paid for the booking
        #[arg(long)]
        total: f64,

        /// Departure date (YYYY-MM-DD, ISO date-time, or DD/MM/YYYY)
        #[arg(long)]
        start_date: Option<String>,
    },

    /// Price difference for moving a booking to another tour
    Change {
        /// New tour price per adult
        #[arg(long)]
        adult_price: f64,

        /// New tour price per child
        #[arg(long, default_value_t = 0.0)]
        child_price: f64,

        /// Adults on the existing booking
        #[arg(long)]
        adults: u32,

        /// Children on the existing booking
        #[arg(long, default_value_t = 0)]
        children: u32,

        /// Total price of the existing booking
        #[arg(long)]
        old_total: f64,

        /// Promotion discount on the new tour
        #[arg(long, default_value_t = 0.0)]
        discount: f64,

        /// Departure date of the existing booking
        #[arg(long)]
        start_date: Option<String>,
    },

    /// Show the active policy table
    Policies,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let table = load_table(args.policy_file.as_ref())?;
    let now = resolve_now(args.now.as_deref())?;
    debug!("evaluating as of {}", now.to_rfc3339());

    let engine = QuoteEngine::new(table).with_clock(FixedClock::new(now));

    match args.command {
        Command::Refund { total, start_date } => {
            let booking = Booking {
                booking_id: "cli".to_string(),
                tour_id: "cli".to_string(),
                start_date,
                num_adults: 1,
                num_children: 0,
                total_price: total,
            };
            let quote = engine.cancellation_quote(&booking);
            info!(
                "tier {} applied to total {}",
                quote.tier.id, quote.total_price
            );
            print_refund(&quote, args.format)?;
        }

        Command::Change {
            adult_price,
            child_price,
            adults,
            children,
            old_total,
            discount,
            start_date,
        } => {
            let booking = Booking {
                booking_id: "cli".to_string(),
                tour_id: "current".to_string(),
                start_date,
                num_adults: adults,
                num_children: children,
                total_price: old_total,
            };
            let offer = TourOffer {
                tour_id: "new".to_string(),
                price_adult: adult_price,
                price_child: child_price,
            };
            let quote = engine.change_quote_with_discount(&booking, &offer, discount);
            print_change(&quote, args.format)?;
        }

        Command::Policies => print_policies(engine.table(), args.format)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_table(path: Option<&PathBuf>) -> Result<PolicyTable> {
    match path {
        Some(path) => {
            info!("loading policy table from {}", path.display());
            PolicyTable::from_file(path)
                .with_context(|| format!("failed to load policy table {}", path.display()))
        }
        None => Ok(PolicyTable::standard()),
    }
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("--now must be an RFC 3339 timestamp, got {raw:?}")),
        None => Ok(SystemClock.now()),
    }
}
