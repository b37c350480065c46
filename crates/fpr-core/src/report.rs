//! # Aggregated Report Model
//!
//! The read-only view produced by the handbook aggregator and consumed by
//! presentation layers. Serialized shape:
//!
//! ```json
//! {
//!   "violated_handbooks": ["FCA CONC"],
//!   "violated_rules": ["Risk Warnings"],
//!   "per_handbook_status": {
//!     "FCA CONC": {
//!       "Risk Warnings": { "evidence": ["..."], "suggestions": ["..."] },
//!       "Avoidance of High-Pressure Selling": "Respected"
//!     }
//!   }
//! }
//! ```
//!
//! All collections are ordered, so two reports with equal contents
//! serialize to identical bytes.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identity::{HandbookId, RuleName};

const RESPECTED: &str = "Respected";

/// Cited evidence and remediation for a rule that was not respected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Findings {
    pub evidence: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Status of one rule under one handbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleStatus {
    /// The rule passed, or could not be evaluated.
    Respected,
    /// The rule was evaluated and violated.
    NotRespected(Findings),
}

impl RuleStatus {
    /// Whether this status is [`RuleStatus::Respected`].
    pub fn is_respected(&self) -> bool {
        matches!(self, Self::Respected)
    }

    /// The findings of a violated rule.
    pub fn findings(&self) -> Option<&Findings> {
        match self {
            Self::Respected => None,
            Self::NotRespected(findings) => Some(findings),
        }
    }
}

impl Serialize for RuleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Respected => serializer.serialize_str(RESPECTED),
            Self::NotRespected(findings) => findings.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for RuleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Marker(String),
            Findings(Findings),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Marker(marker) if marker == RESPECTED => Ok(Self::Respected),
            Repr::Marker(other) => Err(D::Error::custom(format!(
                "unknown rule status \"{other}\""
            ))),
            Repr::Findings(findings) => Ok(Self::NotRespected(findings)),
        }
    }
}

/// Per-handbook, per-rule compliance view of one review run.
///
/// Constructed once by the aggregator; exposes no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregatedReport {
    violated_handbooks: BTreeSet<HandbookId>,
    violated_rules: BTreeSet<RuleName>,
    per_handbook_status: BTreeMap<HandbookId, BTreeMap<RuleName, RuleStatus>>,
}

impl AggregatedReport {
    /// Assemble a report from its three parts.
    pub fn new(
        violated_handbooks: BTreeSet<HandbookId>,
        violated_rules: BTreeSet<RuleName>,
        per_handbook_status: BTreeMap<HandbookId, BTreeMap<RuleName, RuleStatus>>,
    ) -> Self {
        Self {
            violated_handbooks,
            violated_rules,
            per_handbook_status,
        }
    }

    /// Handbooks with at least one violated rule.
    pub fn violated_handbooks(&self) -> &BTreeSet<HandbookId> {
        &self.violated_handbooks
    }

    /// Rules evaluated as non-compliant.
    pub fn violated_rules(&self) -> &BTreeSet<RuleName> {
        &self.violated_rules
    }

    /// Full handbook → rule → status map.
    pub fn per_handbook_status(&self) -> &BTreeMap<HandbookId, BTreeMap<RuleName, RuleStatus>> {
        &self.per_handbook_status
    }

    /// Status map for one handbook.
    pub fn handbook(&self, handbook: &str) -> Option<&BTreeMap<RuleName, RuleStatus>> {
        self.per_handbook_status.get(handbook)
    }

    /// Status of `rule` under `handbook`.
    pub fn status(&self, handbook: &str, rule: &str) -> Option<&RuleStatus> {
        self.handbook(handbook).and_then(|rules| rules.get(rule))
    }

    /// Whether `handbook` has a violated rule.
    pub fn is_handbook_violated(&self, handbook: &str) -> bool {
        self.violated_handbooks.contains(handbook)
    }

    /// True when no rule was violated.
    pub fn is_clean(&self) -> bool {
        self.violated_rules.is_empty()
    }
}
