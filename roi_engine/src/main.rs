//! Entry point for the ROI Engine binary.
//!
//! `serve` starts an HTTP server exposing the calculator; its bind
//! address and optional override files come from the `ROI_BIND_ADDR`,
//! `ROI_CONFIG_PATH` and `ROI_TIER_DIR` environment variables.  The
//! other subcommands run the calculator once and print the result.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use roi_engine::api;
use roi_engine::booking::BookingPolicyKind;
use roi_engine::config::{RoiConfig, ServerConfig};
use roi_engine::engine::Calculator;
use roi_engine::models::{CalculatorInput, TierId};
use roi_engine::report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roi_engine", version, about = "Tiny-home rental ROI calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overriding ROI_BIND_ADDR
        #[arg(long)]
        addr: Option<String>,
    },
    /// Calculate the ROI for one scenario
    Calculate {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare one scenario across every tier
    Compare {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        engine: EngineArgs,
        /// Use the given nightly rate for every tier instead of each
        /// tier's suggested rate
        #[arg(long)]
        keep_rate: bool,
        #[arg(long)]
        json: bool,
    },
    /// List the tier catalog
    Tiers {
        /// Directory of tier override files
        #[arg(long)]
        tier_dir: Option<PathBuf>,
    },
}

/// Scenario fields.  Anything left out keeps its default.
#[derive(Args)]
struct InputArgs {
    /// Tier id: studio, backyard, weekender or residence
    #[arg(long)]
    tier: Option<TierId>,
    /// Base nightly rate; defaults to the tier's suggested rate
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long)]
    peak_occupancy: Option<f64>,
    #[arg(long)]
    off_peak_occupancy: Option<f64>,
    #[arg(long)]
    peak_days: Option<u32>,
    #[arg(long)]
    off_peak_days: Option<u32>,
    #[arg(long)]
    cleaning_fee: Option<f64>,
    #[arg(long)]
    personal_use: Option<u32>,
    /// Average stay length in nights
    #[arg(long)]
    stay_length: Option<f64>,
}

#[derive(Args)]
struct EngineArgs {
    /// JSON file with peak premium, expense schedule and booking policy
    #[arg(long)]
    config: Option<PathBuf>,
    /// Booking policy: stay-length or nightly
    #[arg(long)]
    policy: Option<BookingPolicyKind>,
    /// Directory of tier override files
    #[arg(long)]
    tier_dir: Option<PathBuf>,
}

impl EngineArgs {
    fn calculator(&self) -> Result<Calculator> {
        let server = ServerConfig {
            config_path: self.config.clone(),
            tier_dir: self.tier_dir.clone(),
            ..ServerConfig::default()
        };
        let calculator = api::load_calculator(&server)?;
        match self.policy {
            Some(kind) => {
                let config = RoiConfig {
                    booking_policy: kind,
                    ..calculator.config().clone()
                };
                Ok(Calculator::new(config, calculator.catalog().clone()))
            }
            None => Ok(calculator),
        }
    }
}

impl InputArgs {
    fn to_input(&self, calculator: &Calculator) -> Result<CalculatorInput> {
        let mut input = CalculatorInput::default();
        if let Some(tier) = self.tier {
            input.select_tier(calculator.catalog().get(tier));
        }
        if let Some(rate) = self.rate {
            input.nightly_rate = rate;
        }
        if let Some(pct) = self.peak_occupancy {
            input.peak_occupancy_pct = pct;
        }
        if let Some(pct) = self.off_peak_occupancy {
            input.off_peak_occupancy_pct = pct;
        }
        if let Some(days) = self.peak_days {
            input.peak_season_days = days;
        }
        if let Some(days) = self.off_peak_days {
            input.off_season_days = days;
        }
        if let Some(fee) = self.cleaning_fee {
            input.cleaning_fee_per_stay = fee;
        }
        if let Some(days) = self.personal_use {
            input.personal_use_days = days;
        }
        if let Some(nights) = self.stay_length {
            input.average_stay_length_nights = nights;
        }
        input.validate()?;
        Ok(input)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roi_engine=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { addr } => {
            let mut config = ServerConfig::from_env();
            if let Some(addr) = addr {
                config.bind_addr = addr;
            }
            api::serve(config).await?;
        }
        Command::Calculate {
            input,
            engine,
            json,
        } => {
            let calculator = engine.calculator()?;
            let input = input.to_input(&calculator)?;
            let result = calculator.compute(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render(&result, calculator.catalog().get(input.tier)));
            }
        }
        Command::Compare {
            input,
            engine,
            keep_rate,
            json,
        } => {
            let calculator = engine.calculator()?;
            let input = input.to_input(&calculator)?;
            let results = calculator.compare_tiers(&input, keep_rate);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::render_comparison(&results));
            }
        }
        Command::Tiers { tier_dir } => {
            let server = ServerConfig {
                tier_dir,
                ..ServerConfig::default()
            };
            let calculator = api::load_calculator(&server)?;
            for tier in calculator.catalog().tiers() {
                println!(
                    "{:<10} {:>10}  {:<20} suggested {}/night  {}",
                    tier.id.as_str(),
                    report::format_currency(tier.price),
                    tier.dimensions,
                    report::format_currency(tier.suggested_nightly_rate),
                    tier.features
                );
            }
            let config = calculator.config();
            println!(
                "\npeak premium x{:.2}, annual expenses {}",
                config.peak_premium,
                report::format_currency(config.expenses.total())
            );
        }
    }
    Ok(())
}
