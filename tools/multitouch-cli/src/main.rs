//! Multitouch CLI: replay touch streams through the gesture detectors.
//!
//! Usage:
//!   multitouch replay <FILE>         Run a stream through all detectors
//!   multitouch synth <KIND> -o FILE  Write a scripted gesture stream
//!   multitouch validate <FILE>       Check a stream for sequence problems
//!   multitouch info <FILE>           Show stream header and statistics
//!   multitouch config                Show or initialize the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod host;

#[derive(Parser)]
#[command(
    name = "multitouch",
    about = "Multi-touch gesture detection playground",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Scripted gesture shapes.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SynthKind {
    Drag,
    Pinch,
    Rotate,
    Shove,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a stream to the move, scale, rotate, and shove detectors
    Replay {
        /// JSONL stream file
        path: PathBuf,

        /// Print the host state after every event as JSON lines
        #[arg(long)]
        trace: bool,

        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a scripted gesture stream
    Synth {
        /// Gesture to generate
        #[arg(value_enum)]
        kind: SynthKind,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Gesture magnitude: drag distance (px), pinch factor,
        /// rotation (degrees), or shove distance (px)
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<f64>,

        /// Number of move frames
        #[arg(long, default_value = "30")]
        steps: u32,

        /// Milliseconds between frames
        #[arg(long, default_value = "16")]
        interval_ms: u64,

        /// Half the distance between two fingers (px)
        #[arg(long, default_value = "100.0")]
        radius: f64,
    },

    /// Validate a stream file
    Validate {
        /// JSONL stream file
        path: PathBuf,
    },

    /// Show stream information
    Info {
        /// JSONL stream file
        path: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => multitouch_common::config::AppConfig::load_from(path),
        None => multitouch_common::config::AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    multitouch_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay { path, trace, json } => commands::replay::run(&config, path, trace, json),
        Commands::Synth {
            kind,
            output,
            amount,
            steps,
            interval_ms,
            radius,
        } => commands::synth::run(kind, output, amount, steps, interval_ms, radius),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Info { path } => commands::info::run(path),
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
