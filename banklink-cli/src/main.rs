use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;

use banklink_core::available_services;
use banklink_qonto::provider_for;

#[derive(Parser, Debug)]
#[command(name = "banklink", version, about = "Fetch online bank statements for ledger import")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the remote services banklink can pull statements from
    Services,

    /// Fetch statement lines for a date window and print them
    Fetch {
        /// Provider configuration file (TOML)
        #[arg(long)]
        config: PathBuf,

        /// Window start, UTC ("2023-05-01" or "2023-05-01T10:00:00")
        #[arg(long)]
        since: String,

        /// Window end, UTC (optional; omitted = no upper bound)
        #[arg(long)]
        until: Option<String>,

        /// Print full statement data as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

/// Accept a bare date or a full timestamp; bare dates mean midnight UTC.
fn parse_bound(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date/time: {s}"))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn cmd_services() {
    for (code, label) in available_services() {
        println!("{code}\t{label}");
    }
}

fn cmd_fetch(config: PathBuf, since: String, until: Option<String>, json: bool) -> Result<()> {
    let date_since = parse_bound(&since)?;
    let date_until = until.as_deref().map(parse_bound).transpose()?;

    let file = config::load_config(&config)?;
    let provider = provider_for(file.into_provider_config()?);

    let statement_date = provider.statement_date(date_since, date_until);
    let data = provider
        .obtain_statement_data(Some(date_since), date_until)
        .context("obtaining statement data")?;

    let Some(data) = data else {
        println!("Nothing to import for this period.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("Statement date: {statement_date}");
    println!("{} line(s):", data.lines.len());
    for line in &data.lines {
        let mut extra = String::new();
        if let (Some(id), Some(amount)) = (line.currency_id, line.amount_currency) {
            extra = format!(" ({amount} in currency #{})", id.0);
        }
        println!(
            "{:>4}  {}  {:>12}{}  {}",
            line.sequence,
            line.date.format("%Y-%m-%d"),
            line.amount,
            extra,
            line.name
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Services => {
            cmd_services();
            Ok(())
        }
        Command::Fetch {
            config,
            since,
            until,
            json,
        } => cmd_fetch(config, since, until, json),
    }
}
