//! Loco CLI - inspect zones, run battles and stress the simulation core.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use loco::combat::Role;
use loco::ZoneCoord;
use tracing_subscriber::EnvFilter;

/// Loco - simulation core of a multiplayer browser RPG
#[derive(Parser, Debug)]
#[command(name = "loco")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a zone: level, exits and tiles
    Zone {
        /// Zone x coordinate (-10 to 10)
        #[arg(long, allow_negative_numbers = true)]
        x: i32,

        /// Zone y coordinate (-10 to 10)
        #[arg(long, allow_negative_numbers = true)]
        y: i32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Fight a generated enemy pack with a party built from class tables
    Battle {
        /// Zone key whose level sets the pack level, e.g. "3--7"
        #[arg(short, long, default_value = "1-0", allow_hyphen_values = true)]
        zone: ZoneCoord,

        /// Party classes, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "tank,dps,healer")]
        class: Vec<Role>,

        /// Party level (default: 1)
        #[arg(short, long, default_value = "1")]
        level: u32,

        /// Pack seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Enemy archetype catalog (JSON, default: stock catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many walkers concurrently through a shared world
    Explore {
        /// Starting zone key
        #[arg(short, long, default_value = "1-0", allow_hyphen_values = true)]
        zone: ZoneCoord,

        /// Number of walkers (default: 8)
        #[arg(short, long, default_value = "8")]
        players: u64,

        /// Steps per walker (default: 500)
        #[arg(long, default_value = "500")]
        steps: u32,

        /// Walker level (default: 10)
        #[arg(short, long, default_value = "10")]
        level: u32,

        /// Starting seed (increments for each walker)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Enemy archetype catalog (JSON, default: stock catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Roll enemy rarities in parallel and compare with the roll table
    Rarity {
        /// Number of rolls (default: 1000000)
        #[arg(short, long, default_value = "1000000")]
        rolls: u64,

        /// Starting seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::StatsFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = cli::load_config(args.config.as_deref()).and_then(|config| match args.command {
        Commands::Zone { x, y, format } => cli::zone::execute(x, y, format),

        Commands::Battle {
            zone,
            class,
            level,
            seed,
            catalog,
            format,
        } => cli::battle::execute(&config, zone, &class, level, seed, catalog.as_deref(), format),

        Commands::Explore {
            zone,
            players,
            steps,
            level,
            seed,
            threads,
            catalog,
            format,
            progress,
        } => cli::explore::execute(
            &config,
            &cli::explore::ExploreOptions {
                zone,
                players,
                steps,
                level,
                seed,
                threads,
                catalog,
                progress,
            },
            format,
        ),

        Commands::Rarity {
            rolls,
            seed,
            format,
            progress,
        } => cli::rarity::execute(rolls, seed, format, progress),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
