//! # Rule Evaluator
//!
//! Evaluates one rule against one document. [`RuleEvaluator::attempt`] makes
//! a single oracle call and validates the answer; [`RuleEvaluator::evaluate`]
//! wraps it in the bounded retry loop and always returns a terminal
//! [`EvaluationOutcome`].
//!
//! ## Validation
//!
//! The oracle's own decoding guarantees `label`, `part` and `suggestion` are
//! present. On top of that a violated verdict must pair every cited excerpt
//! with a suggestion. The one exception is a verdict that cites nothing (no
//! excerpts, or only the "no related content" marker) and suggests nothing.

use std::sync::Arc;

use fpr_core::{EvaluationOutcome, Rule, Verdict};
use fpr_oracle::{JudgeRequest, JudgmentOracle, JudgmentResponse};

use crate::error::EvaluationError;
use crate::retry::RetryPolicy;

/// Drives the judgment oracle for single rules.
#[derive(Clone)]
pub struct RuleEvaluator {
    oracle: Arc<dyn JudgmentOracle>,
}

impl std::fmt::Debug for RuleEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEvaluator").finish_non_exhaustive()
    }
}

impl RuleEvaluator {
    pub fn new(oracle: Arc<dyn JudgmentOracle>) -> Self {
        Self { oracle }
    }

    /// One oracle call, bounded by `timeout` when given.
    pub async fn attempt(
        &self,
        rule: &Rule,
        document: &str,
        timeout: Option<std::time::Duration>,
    ) -> Result<Verdict, EvaluationError> {
        let call = self.oracle.judge(JudgeRequest::new(rule, document));
        let response = match timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| EvaluationError::Timeout(limit))??,
            None => call.await?,
        };
        verdict_from_response(rule, response)
    }

    /// Evaluate `rule` with retries. Never fails: exhausted rules come back
    /// as [`EvaluationOutcome::Failed`].
    pub async fn evaluate(
        &self,
        rule: &Rule,
        document: &str,
        policy: &RetryPolicy,
    ) -> EvaluationOutcome {
        let max_attempts = policy.max_attempts();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.attempt(rule, document, policy.attempt_timeout).await {
                Ok(verdict) => {
                    tracing::debug!(
                        rule = %rule.name(),
                        attempt,
                        compliant = verdict.compliant,
                        "rule judged"
                    );
                    return EvaluationOutcome::Judged {
                        attempts: attempt,
                        verdict,
                    };
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        rule = %rule.name(),
                        attempt,
                        max_retries = policy.max_retries,
                        "rule evaluation failed, retrying in {:?}: {e}",
                        policy.delay
                    );
                    tokio::time::sleep(policy.delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        rule = %rule.name(),
                        attempts = attempt,
                        "rule evaluation exhausted retries: {e}"
                    );
                    return EvaluationOutcome::Failed {
                        rule_name: rule.name().clone(),
                        attempts: attempt,
                        last_error: e.to_string(),
                    };
                }
            }
        }
    }
}

/// Turn a raw oracle answer into a [`Verdict`] for `rule`.
///
/// The verdict is always attributed to `rule`; a different echoed name is
/// logged and ignored.
pub(crate) fn verdict_from_response(
    rule: &Rule,
    response: JudgmentResponse,
) -> Result<Verdict, EvaluationError> {
    if let Some(echoed) = response.rule_name.as_deref() {
        if echoed.trim() != rule.name().as_str() {
            tracing::warn!(rule = %rule.name(), echoed, "oracle echoed a different rule name");
        }
    }

    let evidence: Vec<String> = response.part.into_iter().map(trimmed).collect();
    if response.label {
        return Ok(Verdict {
            rule_name: rule.name().clone(),
            compliant: true,
            evidence,
            suggestions: Vec::new(),
        });
    }

    let suggestions: Vec<String> = response.suggestion.into_iter().map(trimmed).collect();
    let verdict = Verdict::violated(rule.name().clone(), evidence, suggestions);
    let bare = verdict.cites_nothing() && verdict.suggestions.is_empty();
    if !bare && verdict.suggestions.len() != verdict.evidence.len() {
        return Err(EvaluationError::Schema {
            rule: rule.name().to_string(),
            reason: format!(
                "{} evidence entries but {} suggestions",
                verdict.evidence.len(),
                verdict.suggestions.len()
            ),
        });
    }
    Ok(verdict)
}

fn trimmed(s: String) -> String {
    let t = s.trim();
    if t.len() == s.len() {
        s
    } else {
        t.to_string()
    }
}
