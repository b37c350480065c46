//! # Verdicts and Evaluation Outcomes
//!
//! A [`Verdict`] is the validated answer of the judgment oracle for one rule.
//! An [`EvaluationOutcome`] is what the scheduler records per rule once the
//! rule is terminal: either a verdict, or a failure after retries ran out.

use serde::{Deserialize, Serialize};

use crate::identity::RuleName;

/// Sentinel evidence entry the oracle uses when the document has nothing
/// related to the rule.
pub const NO_RELATED_CONTENT: &str = "no related content for this rule";

/// Validated oracle answer for one rule.
///
/// When `compliant` is false, `suggestions[i]` is the remediation for
/// `evidence[i]`. A sentinel-only evidence list carries no suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The rule this verdict answers.
    pub rule_name: RuleName,
    /// Whether the document complies with the rule.
    pub compliant: bool,
    /// Excerpts of the document relevant to the rule.
    pub evidence: Vec<String>,
    /// Remediation text, position-parallel to `evidence`.
    pub suggestions: Vec<String>,
}

impl Verdict {
    /// A compliant verdict with no findings.
    pub fn compliant(rule_name: RuleName) -> Self {
        Self {
            rule_name,
            compliant: true,
            evidence: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// A non-compliant verdict.
    pub fn violated(rule_name: RuleName, evidence: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            rule_name,
            compliant: false,
            evidence,
            suggestions,
        }
    }

    /// True when the evidence is empty or holds only the "no related
    /// content" sentinel, i.e. nothing in the document was cited.
    pub fn cites_nothing(&self) -> bool {
        self.evidence.iter().all(|e| is_no_related_content(e))
    }
}

/// Whether an evidence entry is the oracle's "no related content" marker.
///
/// Matching is case-insensitive and ignores surrounding whitespace and
/// trailing punctuation, since models echo the marker loosely.
pub fn is_no_related_content(entry: &str) -> bool {
    entry
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == '"')
        .to_ascii_lowercase()
        .starts_with("no related content")
}

/// Terminal result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    /// The oracle produced a valid verdict.
    Judged {
        /// Number of oracle calls made, including the successful one.
        attempts: u32,
        verdict: Verdict,
    },
    /// Every attempt failed; the rule could not be evaluated.
    Failed {
        rule_name: RuleName,
        /// Number of oracle calls made. Zero when the rule was cut off
        /// before it could report.
        attempts: u32,
        /// Display form of the last error.
        last_error: String,
    },
}

impl EvaluationOutcome {
    /// The rule this outcome belongs to.
    pub fn rule_name(&self) -> &RuleName {
        match self {
            Self::Judged { verdict, .. } => &verdict.rule_name,
            Self::Failed { rule_name, .. } => rule_name,
        }
    }

    /// The verdict, if the rule was evaluated.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Judged { verdict, .. } => Some(verdict),
            Self::Failed { .. } => None,
        }
    }

    /// Number of oracle calls made for this rule.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Judged { attempts, .. } | Self::Failed { attempts, .. } => *attempts,
        }
    }

    /// Whether the rule could not be evaluated.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
