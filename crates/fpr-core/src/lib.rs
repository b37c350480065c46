//! # fpr-core -- Foundational Types for the Review Stack
//!
//! Every other crate in the workspace depends on `fpr-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `RuleName` and `HandbookId` are distinct
//!    validated types. A handbook name cannot be passed where a rule name is
//!    expected.
//!
//! 2. **Immutable registry.** The [`RuleRegistry`] is built once at process
//!    start, holds rules behind `Arc`, and precomputes the handbook → rules
//!    index used by aggregation. Nothing mutates it afterwards.
//!
//! 3. **Ordered collections in output.** Report sets and maps are
//!    `BTreeSet`/`BTreeMap` so serialized reports are byte-for-byte
//!    reproducible.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fpr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod catalog;
pub mod digest;
pub mod error;
pub mod identity;
pub mod registry;
pub mod report;
pub mod rule;
pub mod verdict;

pub use digest::{sha256_hex, DocumentDigest};
pub use error::{CoreError, ValidationError};
pub use identity::{HandbookId, RuleName};
pub use registry::RuleRegistry;
pub use report::{AggregatedReport, Findings, RuleStatus};
pub use rule::Rule;
pub use verdict::{EvaluationOutcome, Verdict, NO_RELATED_CONTENT};
