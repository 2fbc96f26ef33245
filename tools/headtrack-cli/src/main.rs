//! headtrack CLI — convert head-tracking logs to elapsed-time logs.
//!
//! Usage:
//!   headtrack convert <INPUT>   Write <stem>_elapsed.log next to the input
//!   headtrack info <INPUT>      Summarize a log without writing anything
//!   headtrack config            Show (or initialize) the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use headtrack_common::config::HeadtrackConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "headtrack",
    about = "Convert per-frame head-tracking logs into one-per-second elapsed-time logs",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a log to elapsed seconds and Euler angles
    Convert {
        /// Path to the tab-delimited input log
        input: PathBuf,

        /// Output file path (defaults to <stem>_elapsed.log beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a summary of a log
    Info {
        /// Path to the tab-delimited input log
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write the current configuration to the standard location
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = HeadtrackConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    headtrack_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Convert { input, output } => commands::convert::run(input, output, &config),
        Commands::Info { input, json } => commands::info::run(input, json),
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
