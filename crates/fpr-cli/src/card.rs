//! # Card Subcommand
//!
//! Writes a markdown product card (company, industry, product summary) for
//! a promotion transcript.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fpr_oracle::{ProductCardWriter, Transcriber};

use crate::input::{load_transcript, TranscriptSource};

/// Arguments for the `fpr card` subcommand.
#[derive(Args, Debug)]
pub struct CardArgs {
    #[command(flatten)]
    pub source: TranscriptSource,

    /// Write the card here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the card subcommand.
pub fn run_card(args: &CardArgs) -> Result<u8> {
    let client = crate::oracle_client(None)?;
    let card = crate::block_on(product_card(&args.source, &client, &client))??;
    crate::write_output(&card, args.output.as_deref())?;
    Ok(0)
}

pub async fn product_card(
    source: &TranscriptSource,
    transcriber: &dyn Transcriber,
    writer: &dyn ProductCardWriter,
) -> Result<String> {
    let transcript = load_transcript(source, transcriber).await?;
    writer
        .product_card(&transcript)
        .await
        .context("failed to write product card")
}
