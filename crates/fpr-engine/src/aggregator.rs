//! # Handbook Aggregator
//!
//! Folds per-rule outcomes into an [`AggregatedReport`].
//!
//! A rule is violated only when it was judged and found non-compliant.
//! Compliant rules, rules with no outcome, and rules whose evaluation failed
//! are all `Respected`. Under each handbook a violated rule carries its own
//! evidence and suggestions, never another rule's.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use fpr_core::{
    AggregatedReport, EvaluationOutcome, Findings, RuleName, RuleRegistry, RuleStatus, Verdict,
};

/// Build the report for one run. Pure: same inputs, same report.
pub fn aggregate(registry: &RuleRegistry, outcomes: &[EvaluationOutcome]) -> AggregatedReport {
    let mut violations: HashMap<&RuleName, &Verdict> = HashMap::new();
    for verdict in outcomes.iter().filter_map(EvaluationOutcome::verdict) {
        if verdict.compliant {
            continue;
        }
        if !registry.contains(verdict.rule_name.as_str()) {
            tracing::warn!(rule = %verdict.rule_name, "ignoring verdict for unknown rule");
            continue;
        }
        violations.insert(&verdict.rule_name, verdict);
    }

    let mut violated_handbooks = BTreeSet::new();
    let mut violated_rules = BTreeSet::new();
    for name in violations.keys() {
        if let Some(rule) = registry.get(name.as_str()) {
            violated_rules.insert((*name).clone());
            violated_handbooks.extend(rule.handbooks().iter().cloned());
        }
    }

    let per_handbook_status = registry
        .handbooks()
        .map(|handbook| {
            let statuses: BTreeMap<RuleName, RuleStatus> = registry
                .rules_for(handbook)
                .map(|rule| {
                    let status = match violations.get(rule.name()) {
                        Some(verdict) => RuleStatus::NotRespected(Findings {
                            evidence: verdict.evidence.clone(),
                            suggestions: verdict.suggestions.clone(),
                        }),
                        None => RuleStatus::Respected,
                    };
                    (rule.name().clone(), status)
                })
                .collect();
            (handbook.clone(), statuses)
        })
        .collect();

    AggregatedReport::new(violated_handbooks, violated_rules, per_handbook_status)
}
