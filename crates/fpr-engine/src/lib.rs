//! # fpr-engine -- Compliance review engine
//!
//! Turns a transcript and a [`RuleRegistry`](fpr_core::RuleRegistry) into an
//! [`AggregatedReport`](fpr_core::AggregatedReport):
//!
//! ```text
//! Registry -> RuleEvaluator (x N, concurrent) -> FanOutScheduler -> aggregate -> report
//! ```
//!
//! ## Failure policy
//!
//! Rule evaluation is fail-open. A rule whose every attempt failed is not
//! counted as violated and shows as `Respected` in the aggregated report.
//! [`ReviewReport::unevaluated_rules`] lists such rules so callers can tell
//! "passed" from "could not be checked".
//!
//! ## Oracles
//!
//! The engine only sees the `fpr-oracle` traits. Tests drive it with
//! in-memory oracles; the CLI wires in `OracleClient`.

pub mod aggregator;
pub mod error;
pub mod evaluator;
pub mod retry;
pub mod review;
pub mod scheduler;

pub use aggregator::aggregate;
pub use error::{EvaluationError, ReviewError};
pub use evaluator::RuleEvaluator;
pub use retry::RetryPolicy;
pub use review::{ComplianceReview, ReviewInput, ReviewReport, UnevaluatedRule, VideoReview};
pub use scheduler::FanOutScheduler;
