//! # Review Subcommand
//!
//! Reviews one promotion video: the transcript (read from a file, or
//! transcribed from audio) is judged against every catalog rule, and any
//! frames found in `--frames-dir` are scanned for a risk disclaimer.
//!
//! Prints the review report as JSON. Exit code 0 when no rule is violated,
//! 1 when at least one is.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use fpr_engine::retry::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};
use fpr_engine::{ComplianceReview, RetryPolicy, ReviewInput, ReviewReport};
use fpr_oracle::OracleClient;

use crate::input::{load_frames, load_registry, load_transcript, TranscriptSource};

/// Arguments for the `fpr review` subcommand.
#[derive(Args, Debug)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub source: TranscriptSource,

    /// Directory of JPEG frames sampled from the video.
    #[arg(long, value_name = "DIR")]
    pub frames_dir: Option<PathBuf>,

    /// YAML rule catalog. Defaults to the built-in FCA catalog.
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Retries per rule after the first failed attempt.
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Pause between attempts for the same rule.
    #[arg(long, default_value_t = DEFAULT_RETRY_DELAY.as_millis() as u64)]
    pub retry_delay_ms: u64,

    /// Limit on a single oracle call.
    #[arg(long)]
    pub attempt_timeout_secs: Option<u64>,

    /// Limit on evaluating all rules. Rules still running are reported as unevaluated.
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Maximum number of rules evaluated at once. Unbounded by default.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override the judgment model.
    #[arg(long)]
    pub judge_model: Option<String>,

    /// Write the report here instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ReviewArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::default()
            .with_max_retries(self.max_retries)
            .with_delay(Duration::from_millis(self.retry_delay_ms));
        if let Some(secs) = self.attempt_timeout_secs {
            policy = policy.with_attempt_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.deadline_secs {
            policy = policy.with_deadline(Duration::from_secs(secs));
        }
        policy
    }
}

/// Execute the review subcommand.
pub fn run_review(args: &ReviewArgs) -> Result<u8> {
    let client = crate::oracle_client(args.judge_model.as_deref())?;
    let report = crate::block_on(review(args, client))??;

    if !report.is_complete() {
        let rules: Vec<&str> = report
            .unevaluated_rules
            .iter()
            .map(|r| r.rule_name.as_str())
            .collect();
        tracing::warn!(?rules, "some rules could not be evaluated and count as respected");
    }

    let json = serde_json::to_string_pretty(&report).context("failed to render report")?;
    crate::write_output(&json, args.output.as_deref())?;
    Ok(exit_code(&report))
}

/// Load inputs and run the review with `client` serving every oracle role.
pub async fn review(args: &ReviewArgs, client: OracleClient) -> Result<ReviewReport> {
    let registry = Arc::new(load_registry(args.rules.as_deref())?);
    let frames = args.frames_dir.as_deref().map(load_frames).transpose()?;
    let transcript = load_transcript(&args.source, &client).await?;

    let client = Arc::new(client);
    let mut engine = ComplianceReview::new(registry, client.clone())
        .with_video(client.clone(), client)
        .with_policy(args.retry_policy());
    if let Some(limit) = args.concurrency {
        engine = engine.with_concurrency_limit(limit);
    }

    engine
        .run(ReviewInput { transcript, frames })
        .await
        .context("review aborted")
}

/// 0 when nothing was violated, 1 otherwise.
pub fn exit_code(report: &ReviewReport) -> u8 {
    if report.transcript_review.is_clean() {
        0
    } else {
        1
    }
}
