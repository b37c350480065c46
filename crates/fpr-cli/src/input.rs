//! Loading review inputs from disk: rule catalogs, transcripts, frames.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fpr_core::RuleRegistry;
use fpr_oracle::Transcriber;

/// Where the transcript comes from. Exactly one must be given.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TranscriptSource {
    /// Transcript text file.
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Audio file to transcribe first.
    #[arg(long, value_name = "FILE")]
    pub audio: Option<PathBuf>,
}

/// Load the rule catalog: a YAML file when given, else the built-in FCA catalog.
pub fn load_registry(path: Option<&Path>) -> Result<RuleRegistry> {
    match path {
        Some(path) => RuleRegistry::load(path)
            .with_context(|| format!("failed to load rule catalog {}", path.display())),
        None => RuleRegistry::fca_default().context("built-in rule catalog is invalid"),
    }
}

/// Read the transcript, transcribing audio if that is the source.
pub async fn load_transcript(
    source: &TranscriptSource,
    transcriber: &dyn Transcriber,
) -> Result<String> {
    if let Some(path) = &source.transcript {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript {}", path.display()));
    }
    match &source.audio {
        Some(path) => transcribe_file(path, transcriber).await,
        None => anyhow::bail!("either --transcript or --audio is required"),
    }
}

/// Transcribe one audio file.
pub async fn transcribe_file(path: &Path, transcriber: &dyn Transcriber) -> Result<String> {
    let audio =
        std::fs::read(path).with_context(|| format!("failed to read audio {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio")
        .to_string();
    tracing::info!(file = %path.display(), bytes = audio.len(), "transcribing audio");
    transcriber
        .transcribe(audio, &file_name)
        .await
        .with_context(|| format!("failed to transcribe {}", path.display()))
}

/// Read every `.jpg` / `.jpeg` in `dir`, ordered by file name.
pub fn load_frames(dir: &Path) -> Result<Vec<Vec<u8>>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read frames directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_jpeg(p))
        .collect();
    paths.sort();

    let frames = paths
        .iter()
        .map(|p| std::fs::read(p).with_context(|| format!("failed to read frame {}", p.display())))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(dir = %dir.display(), frames = frames.len(), "frames loaded");
    Ok(frames)
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}
