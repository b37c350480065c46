//! Engine error types.

use std::time::Duration;

use fpr_oracle::OracleError;

/// Why a single evaluation attempt produced no verdict.
///
/// Every variant is retried the same way; none is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// The oracle call failed (transport, status, unreadable output).
    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),
    /// The oracle call did not finish within the per-attempt limit.
    #[error("oracle call timed out after {0:?}")]
    Timeout(Duration),
    /// The oracle answered with a structurally valid but unusable verdict.
    #[error("invalid verdict for rule {rule}: {reason}")]
    Schema { rule: String, reason: String },
}

/// Errors that abort a review before any rule is dispatched.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("transcript is empty")]
    EmptyTranscript,
    #[error("frames were supplied but no frame reader is configured")]
    VideoUnsupported,
}
