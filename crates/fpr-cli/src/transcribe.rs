//! # Transcribe Subcommand

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::input::transcribe_file;

/// Arguments for the `fpr transcribe` subcommand.
#[derive(Args, Debug)]
pub struct TranscribeArgs {
    /// Audio file (any format the transcription service accepts).
    #[arg(value_name = "AUDIO")]
    pub audio: PathBuf,

    /// Write the transcript here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the transcribe subcommand.
pub fn run_transcribe(args: &TranscribeArgs) -> Result<u8> {
    let client = crate::oracle_client(None)?;
    let transcript = crate::block_on(transcribe_file(&args.audio, &client))??;
    crate::write_output(&transcript, args.output.as_deref())?;
    Ok(0)
}
