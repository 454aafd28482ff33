mod cli;
mod logging;

use std::fs;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use deadline_engine::{calculate, format, Calendar, CalendarConfig};
use tracing::info;

use crate::cli::{CalculateArgs, Cli, Command, ShowArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Calculate(args) => run_calculate(args),
        Command::Show(args) => run_show(args),
    }
}

fn run_calculate(args: CalculateArgs) -> Result<()> {
    let calendar = load_calendar(&args.config)?;
    let start = format::parse_datetime(&args.start)?;
    let result = calculate(&calendar, args.duration, start).with_context(|| {
        format!(
            "computing deadline for {}s from {}",
            args.duration, args.start
        )
    })?;

    info!(days_advanced = result.days_advanced, "deadline found");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format::format_deadline(&result.deadline));
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let calendar = load_calendar(&args.config)?;
    println!("{calendar}");
    Ok(())
}

fn load_calendar(path: &Path) -> Result<Calendar> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading calendar description {}", path.display()))?;
    let calendar = CalendarConfig::from_json(&json)
        .and_then(|config| config.build())
        .with_context(|| format!("loading calendar description {}", path.display()))?;
    info!(path = %path.display(), overrides = calendar.overrides().count(), "calendar loaded");
    Ok(calendar)
}
