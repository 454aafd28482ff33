use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Business-hours deadline calculator.
#[derive(Parser)]
#[command(
    name = "deadline",
    version,
    about = "Compute when work finishes given a business calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the deadline for a duration of work.
    Calculate(CalculateArgs),
    /// Print the resolved weekday table and date overrides.
    Show(ShowArgs),
}

/// Arguments for the `calculate` subcommand.
#[derive(clap::Args)]
pub struct CalculateArgs {
    /// Path to the JSON calendar description.
    #[arg(short, long, default_value = "calendar.json")]
    pub config: PathBuf,

    /// Working time needed, in seconds.
    #[arg(short, long)]
    pub duration: u32,

    /// Start moment as "yyyy-MM-dd H:mm".
    #[arg(short, long)]
    pub start: String,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Path to the JSON calendar description.
    #[arg(short, long, default_value = "calendar.json")]
    pub config: PathBuf,
}
