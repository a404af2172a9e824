//! Hillcompass CLI - Command-line interface
//!
//! Drives the hillcompass library from the terminal: manage settings, query
//! the landmark service, and replay sensor traces through a compass session.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::lookup::LookupArgs;
use commands::run::{OutputFormat, RunArgs, StrategyArg};
use error::CliError;

#[derive(Parser)]
#[command(name = "hillcompass")]
#[command(about = "Augmented-reality hill compass: bearings, buckets and overlay transforms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Fetch nearby landmarks for a position and show their bearing buckets
    Lookup {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Landmark service URL (overrides lookup.base_url)
        #[arg(long)]
        url: Option<String>,

        /// Search radius (overrides lookup.radius)
        #[arg(long)]
        radius: Option<f64>,

        /// Also project markers for this device heading
        #[arg(long, allow_hyphen_values = true)]
        heading: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run a compass session over a JSON-lines sensor trace
    Run {
        /// Trace file; reads stdin when omitted
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Serve landmarks from a JSON file instead of the service
        #[arg(long)]
        landmarks: Option<PathBuf>,

        /// Landmark service URL (overrides lookup.base_url)
        #[arg(long)]
        url: Option<String>,

        /// Heading source (overrides heading.strategy)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Frame output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Milliseconds to wait for pending lookups after the trace ends
        #[arg(long, default_value = "500")]
        linger_ms: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { command } => commands::config::run(command),
        Commands::Lookup {
            lat,
            lon,
            url,
            radius,
            heading,
            json,
        } => commands::lookup::run(LookupArgs {
            lat,
            lon,
            url,
            radius,
            heading,
            json,
        }),
        Commands::Run {
            trace,
            landmarks,
            url,
            strategy,
            format,
            linger_ms,
        } => commands::run::run(RunArgs {
            trace,
            landmarks,
            url,
            strategy,
            format,
            linger_ms,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
