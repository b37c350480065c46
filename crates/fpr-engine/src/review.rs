//! # Compliance Review
//!
//! Top-level orchestration for one promotion video. Two paths run
//! concurrently and the review takes as long as the slower of them:
//!
//! - **Transcript path**: every registry rule is judged against the
//!   transcript through the [`FanOutScheduler`], then aggregated per handbook.
//! - **Video path** (optional): each frame is read for on-screen text, in
//!   order, and the collected texts are scanned for a risk disclaimer.
//!
//! Neither path can fail the review once dispatched. Rules that could not be
//! evaluated are listed in [`ReviewReport::unevaluated_rules`]; unreadable
//! frames are skipped; a failed disclaimer scan is reported as `None`.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use fpr_core::{AggregatedReport, DocumentDigest, EvaluationOutcome, RuleName, RuleRegistry};
use fpr_oracle::{DisclaimerFinding, DisclaimerScanner, FrameReader, JudgmentOracle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregator::aggregate;
use crate::error::ReviewError;
use crate::retry::RetryPolicy;
use crate::scheduler::FanOutScheduler;

/// What to review.
#[derive(Debug, Clone, Default)]
pub struct ReviewInput {
    pub transcript: String,
    /// JPEG frames sampled from the video, in playback order. `None` skips
    /// the video path.
    pub frames: Option<Vec<Vec<u8>>>,
}

/// A rule that produced no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnevaluatedRule {
    pub rule_name: RuleName,
    pub attempts: u32,
    pub last_error: String,
}

/// Outcome of the video path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReview {
    pub frames_scanned: usize,
    pub frames_with_text: usize,
    /// `None` when the disclaimer scan itself failed.
    pub disclaimer: Option<DisclaimerFinding>,
}

/// Everything one review run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub run_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub transcript_digest: DocumentDigest,
    pub duration_ms: u64,
    pub transcript_review: AggregatedReport,
    /// Rules excluded from the verdict because every attempt failed.
    /// They appear as `Respected` in `transcript_review`.
    pub unevaluated_rules: Vec<UnevaluatedRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_review: Option<VideoReview>,
}

impl ReviewReport {
    /// Whether every rule produced a verdict.
    pub fn is_complete(&self) -> bool {
        self.unevaluated_rules.is_empty()
    }
}

#[derive(Clone)]
struct VideoCapabilities {
    reader: Arc<dyn FrameReader>,
    scanner: Arc<dyn DisclaimerScanner>,
}

/// Reviews a transcript, and optionally video frames, against a rule registry.
#[derive(Clone)]
pub struct ComplianceReview {
    registry: Arc<RuleRegistry>,
    scheduler: FanOutScheduler,
    video: Option<VideoCapabilities>,
}

impl std::fmt::Debug for ComplianceReview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceReview")
            .field("rules", &self.registry.len())
            .field("scheduler", &self.scheduler)
            .field("video", &self.video.is_some())
            .finish()
    }
}

impl ComplianceReview {
    pub fn new(registry: Arc<RuleRegistry>, judge: Arc<dyn JudgmentOracle>) -> Self {
        Self {
            registry,
            scheduler: FanOutScheduler::new(judge),
            video: None,
        }
    }

    /// Enable the video path.
    pub fn with_video(
        mut self,
        reader: Arc<dyn FrameReader>,
        scanner: Arc<dyn DisclaimerScanner>,
    ) -> Self {
        self.video = Some(VideoCapabilities { reader, scanner });
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.scheduler = self.scheduler.with_policy(policy);
        self
    }

    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.scheduler = self.scheduler.with_concurrency_limit(limit);
        self
    }

    /// Run the review.
    ///
    /// # Errors
    ///
    /// Fails before dispatch on a blank transcript, or when frames are given
    /// without video capabilities.
    pub async fn run(&self, input: ReviewInput) -> Result<ReviewReport, ReviewError> {
        if input.transcript.trim().is_empty() {
            return Err(ReviewError::EmptyTranscript);
        }
        if input.frames.is_some() && self.video.is_none() {
            return Err(ReviewError::VideoUnsupported);
        }

        let run_id = Uuid::new_v4();
        let evaluated_at = Utc::now();
        let started = Instant::now();
        let transcript_digest = DocumentDigest::of(&input.transcript);
        tracing::info!(
            %run_id,
            rules = self.registry.len(),
            frames = input.frames.as_ref().map_or(0, Vec::len),
            digest = %transcript_digest,
            "review started"
        );

        let document: Arc<str> = Arc::from(input.transcript);
        let transcript_path = self.scheduler.run_all(self.registry.rules(), document);
        let video_path = async {
            match (&input.frames, &self.video) {
                (Some(frames), Some(video)) => Some(review_frames(video, frames).await),
                _ => None,
            }
        };
        let (outcomes, video_review) = tokio::join!(transcript_path, video_path);

        let transcript_review = aggregate(&self.registry, &outcomes);
        let mut unevaluated_rules: Vec<UnevaluatedRule> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                EvaluationOutcome::Failed {
                    rule_name,
                    attempts,
                    last_error,
                } => Some(UnevaluatedRule {
                    rule_name,
                    attempts,
                    last_error,
                }),
                EvaluationOutcome::Judged { .. } => None,
            })
            .collect();
        unevaluated_rules.sort_by(|a, b| a.rule_name.cmp(&b.rule_name));

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            %run_id,
            violated_rules = transcript_review.violated_rules().len(),
            violated_handbooks = transcript_review.violated_handbooks().len(),
            unevaluated = unevaluated_rules.len(),
            duration_ms,
            "review finished"
        );

        Ok(ReviewReport {
            run_id,
            evaluated_at,
            transcript_digest,
            duration_ms,
            transcript_review,
            unevaluated_rules,
            video_review,
        })
    }
}

async fn review_frames(video: &VideoCapabilities, frames: &[Vec<u8>]) -> VideoReview {
    let mut texts = Vec::new();
    for (index, frame) in frames.iter().enumerate() {
        match video.reader.read_frame(frame).await {
            Ok(Some(text)) => texts.push(text),
            Ok(None) => {}
            Err(e) => tracing::warn!(frame = index, "frame text extraction failed, skipping: {e}"),
        }
    }

    let disclaimer = if texts.is_empty() {
        Some(DisclaimerFinding::absent())
    } else {
        match video.scanner.scan(&texts).await {
            Ok(finding) => Some(finding),
            Err(e) => {
                tracing::error!(frames_with_text = texts.len(), "disclaimer scan failed: {e}");
                None
            }
        }
    };

    VideoReview {
        frames_scanned: frames.len(),
        frames_with_text: texts.len(),
        disclaimer,
    }
}
