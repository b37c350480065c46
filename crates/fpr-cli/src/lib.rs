//! # fpr-cli -- CLI for Financial Promotion Review
//!
//! Provides the `fpr` command-line interface.
//!
//! ## Subcommands
//!
//! - `fpr rules` -- List the rule catalog grouped by handbook.
//! - `fpr review` -- Review a transcript (or audio) and optional video frames.
//! - `fpr card` -- Write a markdown product card for a transcript.
//! - `fpr transcribe` -- Transcribe an audio file.
//!
//! ```bash
//! fpr rules --rules catalog.yaml
//! fpr review --transcript promo.txt --frames-dir frames/ --output report.json
//! fpr review --audio promo.mp3 --max-retries 5 --deadline-secs 120
//! ```
//!
//! Oracle settings come from the environment (`GROQ_API_KEY`,
//! `FPR_ORACLE_URL`, `FPR_*_MODEL`).

pub mod card;
pub mod input;
pub mod review;
pub mod rules;
pub mod transcribe;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use fpr_oracle::{OracleClient, OracleConfig};

/// Build an oracle client from the environment, optionally overriding the
/// judgment model.
pub fn oracle_client(judge_model: Option<&str>) -> Result<OracleClient> {
    let mut config = OracleConfig::from_env().context("failed to load oracle configuration")?;
    if let Some(model) = judge_model {
        config = config.with_judge_model(model);
    }
    tracing::debug!(?config, "oracle configuration loaded");
    OracleClient::new(config).context("failed to build oracle client")
}

/// Run a future to completion on a fresh multi-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Write `text` to `output`, or to stdout when no path is given.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
            Ok(())
        }
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
