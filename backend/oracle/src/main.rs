//! Agricrowd Price Oracle
//!
//! Command-line adapter that:
//! 1. Reads the latest native/reference price (HTTP feed or the contract)
//! 2. Converts native amounts (stroops) to the reference currency
//! 3. Reports on-chain project progress in both currencies

mod chain;
mod config;
mod errors;
mod feed;
mod price;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::errors::Result;
use crate::price::{format_units, PriceDatum};

#[derive(Parser, Debug)]
#[command(name = "agricrowd-oracle")]
#[command(about = "Agricrowd Oracle - price feed reads and currency conversion", long_about = None)]
struct Cli {
    /// Reject price data older than this many seconds
    #[arg(long, global = true)]
    max_age: Option<u64>,

    /// Where to read the price from
    #[arg(long, value_enum, global = true, default_value_t = Source::Http)]
    source: Source,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the latest price datum
    Price,

    /// Convert a native amount (base units) to the reference currency
    Convert {
        #[arg(long)]
        amount: i128,
    },

    /// Show a project's goal and progress in both currencies
    Project {
        #[arg(long)]
        id: u64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Source {
    /// `PRICE_FEED_URL`
    Http,
    /// The contract's `get_price`
    Chain,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    match cli.command {
        Command::Price => {
            let datum = load_price(&config, cli.source, cli.max_age).await?;
            info!("Price: {}", datum.display_price());
            info!("Decimals: {}", datum.decimals);
            info!("Updated at: {}", describe_timestamp(datum.updated_at));
        }
        Command::Convert { amount } => {
            if amount < 0 {
                return Err(errors::OracleError::Config(
                    "--amount must not be negative".to_string(),
                ));
            }
            let datum = load_price(&config, cli.source, cli.max_age).await?;
            let converted = datum.convert(amount)?;
            info!(
                "{} native = {} reference",
                format_units(amount, config.native_decimals),
                format_units(converted, config.native_decimals)
            );
        }
        Command::Project { id } => {
            let project = chain::fetch_project(&config, id).await?;
            let datum = load_price(&config, cli.source, cli.max_age).await?;
            let decimals = config.native_decimals;

            info!("Project {} (owner {})", project.id, project.owner);
            info!(
                "Goal:     {} native / {} reference",
                format_units(project.funding_goal, decimals),
                format_units(datum.convert(project.funding_goal)?, decimals)
            );
            info!(
                "Raised:   {} native / {} reference",
                format_units(project.total_raised(), decimals),
                format_units(datum.convert(project.total_raised())?, decimals)
            );
            info!(
                "Funded (withdrawable): {}, donated: {}, funders: {}",
                format_units(project.total_funded, decimals),
                format_units(project.total_donated, decimals),
                project.funder_count
            );
            info!("Progress: {}", format_units(i128::from(project.progress_bps()), 2) + "%");
        }
    }

    Ok(())
}

/// Load the price from the selected source and apply the optional age bound.
async fn load_price(config: &Config, source: Source, max_age: Option<u64>) -> Result<PriceDatum> {
    let datum = match source {
        Source::Http => feed::fetch_latest(config).await?,
        Source::Chain => chain::fetch_price(config).await?,
    };

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    match max_age {
        Some(max_age) => datum.check_age(now, max_age)?,
        None => {
            let age = datum.age_secs(now);
            if age > 3_600 {
                warn!("Price was last updated {}s ago", age);
            }
        }
    }
    Ok(datum)
}

fn describe_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| chrono::DateTime::from_timestamp(s, 0))
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
