//! `vn-dates`: normalize Vietnamese relative dates from the command line.
//!
//! ```text
//! vn-dates normalize "ngày mai 10h họp" --sent-at 2025-01-01T08:00:00Z
//! echo '{"user_id":"u","group_id":"g","message":"tuần sau bay"}' | vn-dates prepare
//! DB_HOST=db vn-dates config
//! ```
//!
//! Logs go to stderr and are controlled by `RUST_LOG` (default `warn`).

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vn_dates::{
    prepare_add, AddMemoryRequest, MemoryBackendConfig, NormalizeOptions, Normalizer,
    SystemClock, WeekStartDay,
};

#[derive(Parser)]
#[command(
    name = "vn-dates",
    version,
    about = "Normalize Vietnamese relative dates into absolute dates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite relative dates in TEXT (or stdin) into absolute dates
    Normalize {
        /// Text to normalize; read from stdin when omitted
        text: Option<String>,
        /// ISO 8601 send time to anchor on (defaults to now)
        #[arg(long)]
        sent_at: Option<String>,
        /// IANA timezone to resolve in, e.g. Asia/Ho_Chi_Minh
        #[arg(long)]
        timezone: Option<String>,
        /// First day of the week for week ranges
        #[arg(long, value_enum, default_value_t = WeekStart::Monday)]
        week_start: WeekStart,
        /// Print a JSON report with every substitution
        #[arg(long)]
        json: bool,
    },
    /// Turn an add-memory request (JSON on stdin) into the memory store payload
    Prepare {
        /// IANA timezone to resolve in, e.g. Asia/Ho_Chi_Minh
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Print the memory backend configuration built from the environment
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum WeekStart {
    Monday,
    Sunday,
}

impl From<WeekStart> for WeekStartDay {
    fn from(value: WeekStart) -> Self {
        match value {
            WeekStart::Monday => WeekStartDay::Monday,
            WeekStart::Sunday => WeekStartDay::Sunday,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize {
            text,
            sent_at,
            timezone,
            week_start,
            json,
        } => {
            let options = options(timezone.as_deref())?.with_week_start(week_start.into());
            let normalizer = Normalizer::with_options(options)?;
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let reference = normalizer.reference(sent_at.as_deref(), &SystemClock);
            if json {
                let report = normalizer.normalize_with_report(&text, &reference);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", normalizer.normalize(&text, &reference));
            }
        }
        Command::Prepare { timezone } => {
            let normalizer = Normalizer::with_options(options(timezone.as_deref())?)?;
            let input = read_stdin()?;
            let request: AddMemoryRequest =
                serde_json::from_str(&input).context("invalid add-memory request JSON")?;
            let payload = prepare_add(&normalizer, &request, &SystemClock);
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Config => {
            let config = MemoryBackendConfig::from_env()?;
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        }
    }

    Ok(())
}

fn options(timezone: Option<&str>) -> Result<NormalizeOptions> {
    let options = NormalizeOptions::default();
    match timezone {
        Some(name) => Ok(options.with_timezone_name(name)?),
        None => Ok(options),
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
