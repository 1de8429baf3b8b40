#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the air health reports.
//!
//! Every command loads the configuration and the source CSVs once, runs
//! one analysis, and prints either a text table or the JSON form of the
//! result (`--json`).

mod render;

use std::path::PathBuf;

use air_health_analysis::{correlation_matrix, pollutant_trends, scatter, state_history};
use air_health_config::AppConfig;
use air_health_dataset::Dataset;
use air_health_dataset::snapshot::state_indicators;
use air_health_dataset_models::Pollutant;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "air_health",
    about = "Correlate air quality with respiratory illness across US states"
)]
struct Cli {
    /// TOML config file merged over the built-in defaults
    #[arg(long, global = true, env = "AIR_HEALTH_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show respiratory, air quality, and influenza indicators per state
    States {
        /// Year to show (defaults to `default_year` from the config)
        #[arg(long)]
        year: Option<i32>,

        /// Pollutant for the air quality columns (e.g. "PM2.5", "O3")
        #[arg(long)]
        pollutant: Option<Pollutant>,
    },
    /// Correlate one pollutant with the respiratory index for one year
    Correlate {
        /// Year to correlate (defaults to `default_year` from the config)
        #[arg(long)]
        year: Option<i32>,

        /// Pollutant to correlate (defaults to the first configured one)
        #[arg(long)]
        pollutant: Option<Pollutant>,
    },
    /// Year-by-year values of every loaded metric for one state
    History {
        /// State code or name (e.g. "CA", "California")
        state: String,
    },
    /// Correlation of every configured pollutant for every configured year
    Matrix,
    /// Whether each pollutant's correlation strengthened or weakened over time
    Trends,
    /// Print the effective configuration
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let default_pollutant = config
        .pollutants
        .first()
        .copied()
        .unwrap_or(Pollutant::Pm25);

    match cli.command {
        Commands::Config => {
            if cli.json {
                print_json(&config)?;
            } else {
                print!("{}", config.to_toml()?);
            }
        }
        Commands::States { year, pollutant } => {
            let dataset = load_dataset(&config)?;
            let year = year.unwrap_or(config.default_year);
            let rows = state_indicators(&dataset, year, pollutant.unwrap_or(default_pollutant));

            if rows.is_empty() {
                log::warn!("No state reported any data for {year}");
            }
            if cli.json {
                print_json(&rows)?;
            } else {
                println!("{}", render::states(year, &rows));
            }
        }
        Commands::Correlate { year, pollutant } => {
            let dataset = load_dataset(&config)?;
            let plot = scatter(
                &dataset,
                year.unwrap_or(config.default_year),
                pollutant.unwrap_or(default_pollutant),
                &config.strength,
            )?;

            if cli.json {
                print_json(&plot)?;
            } else {
                println!("{}", render::scatter(&plot));
            }
        }
        Commands::History { state } => {
            let dataset = load_dataset(&config)?;
            let history = state_history(&dataset, &state, &config.years, &config.pollutants)?;

            if cli.json {
                print_json(&history)?;
            } else {
                println!("{}", render::history(&history));
            }
        }
        Commands::Matrix => {
            let dataset = load_dataset(&config)?;
            let grid =
                correlation_matrix(&dataset, &config.years, &config.pollutants, &config.strength)?;

            if cli.json {
                print_json(&grid)?;
            } else {
                println!("{}", render::matrix(&grid));
            }
        }
        Commands::Trends => {
            let dataset = load_dataset(&config)?;
            let grid =
                correlation_matrix(&dataset, &config.years, &config.pollutants, &config.strength)?;
            let report = pollutant_trends(&grid, &config.trend)?;

            if cli.json {
                print_json(&report)?;
            } else {
                println!("{}", render::trends(&report));
            }
        }
    }

    Ok(())
}

fn load_dataset(config: &AppConfig) -> Result<Dataset, Box<dyn std::error::Error>> {
    let dataset = Dataset::load(&config.data, &config.influenza)?;
    log::info!(
        "Loaded {} respiratory values, {} pollutant tables, {} influenza estimates",
        dataset.respiratory.len(),
        dataset.pollutants.len(),
        dataset.influenza.len()
    );
    Ok(dataset)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
