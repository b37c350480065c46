//! # fpr CLI entry point
//!
//! Parses command-line arguments, initialises logging, and dispatches to
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fpr_cli::card::{run_card, CardArgs};
use fpr_cli::review::{run_review, ReviewArgs};
use fpr_cli::rules::{run_rules, RulesArgs};
use fpr_cli::transcribe::{run_transcribe, TranscribeArgs};

/// Financial promotion review.
///
/// Checks short-form video sales content against FCA financial promotion
/// rules and reports violations per handbook.
#[derive(Parser, Debug)]
#[command(name = "fpr", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the rule catalog grouped by handbook.
    Rules(RulesArgs),

    /// Review a transcript and optional video frames against the rule catalog.
    Review(ReviewArgs),

    /// Write a markdown product card for a transcript.
    Card(CardArgs),

    /// Transcribe an audio file.
    Transcribe(TranscribeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "fpr starting");

    let result = match cli.command {
        Commands::Rules(args) => run_rules(&args),
        Commands::Review(args) => run_review(&args),
        Commands::Card(args) => run_card(&args),
        Commands::Transcribe(args) => run_transcribe(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
