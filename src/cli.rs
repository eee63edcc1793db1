//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pitpool")]
#[command(version)]
#[command(about = "Season-long fantasy motorsport prediction pool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to the platform config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show whether a race is in progress, upcoming, or neither
    Status,
    /// Register a new pool member
    Register {
        /// Participant name (unique)
        name: String,
    },
    /// Submit a driver pick for the current race cycle
    Pick {
        /// Participant name
        name: String,
        /// Driver id or full name
        driver: String,
    },
    /// List the drivers available to pick
    Drivers,
    /// Print the leaderboard
    Leaderboard,
    /// Fetch final results for today's race and apply scores
    Settle,
}
