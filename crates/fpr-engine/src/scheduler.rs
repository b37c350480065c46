//! # Fan-out Scheduler
//!
//! Dispatches every rule as its own tokio task and waits until all of them
//! are terminal. Each rule retries independently; one rule's failures never
//! delay or abort another.
//!
//! ## Result slots
//!
//! One slot per input rule is reserved before dispatch. A task reports
//! `(index, outcome)` and the collector fills that slot, so the output is in
//! input order and has exactly one outcome per rule.
//!
//! ## Deadline
//!
//! With [`RetryPolicy::deadline`] set, tasks still running when it expires
//! are aborted and their slots filled with a failure. A task that panics is
//! recorded the same way.

use std::sync::Arc;

use fpr_core::{EvaluationOutcome, Rule};
use fpr_oracle::JudgmentOracle;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::evaluator::RuleEvaluator;
use crate::retry::RetryPolicy;

/// Runs all rules concurrently with per-rule retry.
#[derive(Debug, Clone)]
pub struct FanOutScheduler {
    evaluator: RuleEvaluator,
    policy: RetryPolicy,
    concurrency_limit: Option<usize>,
}

impl FanOutScheduler {
    pub fn new(oracle: Arc<dyn JudgmentOracle>) -> Self {
        Self {
            evaluator: RuleEvaluator::new(oracle),
            policy: RetryPolicy::default(),
            concurrency_limit: None,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cap the number of rules evaluated at once. Zero is treated as one.
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit.max(1));
        self
    }

    /// Evaluate every rule against `document`. Returns one outcome per rule,
    /// in the order of `rules`.
    pub async fn run_all(&self, rules: &[Arc<Rule>], document: Arc<str>) -> Vec<EvaluationOutcome> {
        let mut slots: Vec<Option<EvaluationOutcome>> = vec![None; rules.len()];
        let permits = self.concurrency_limit.map(|n| Arc::new(Semaphore::new(n)));
        let mut tasks = JoinSet::new();

        for (idx, rule) in rules.iter().enumerate() {
            let evaluator = self.evaluator.clone();
            let policy = self.policy.clone();
            let rule = Arc::clone(rule);
            let document = Arc::clone(&document);
            let permits = permits.clone();
            tasks.spawn(async move {
                // Held for the whole evaluation, retries included.
                let _permit = match permits {
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };
                (idx, evaluator.evaluate(&rule, &document, &policy).await)
            });
        }

        let deadline_hit = match self.policy.deadline {
            Some(limit) => tokio::time::timeout(limit, collect(&mut tasks, &mut slots))
                .await
                .is_err(),
            None => {
                collect(&mut tasks, &mut slots).await;
                false
            }
        };
        if deadline_hit {
            tracing::error!(
                deadline = ?self.policy.deadline,
                pending = tasks.len(),
                "run deadline exceeded, aborting remaining rules"
            );
            tasks.abort_all();
        }

        rules
            .iter()
            .zip(slots)
            .map(|(rule, slot)| {
                slot.unwrap_or_else(|| EvaluationOutcome::Failed {
                    rule_name: rule.name().clone(),
                    attempts: 0,
                    last_error: if deadline_hit {
                        "run deadline exceeded".to_string()
                    } else {
                        "evaluation task did not complete".to_string()
                    },
                })
            })
            .collect()
    }
}

async fn collect(
    tasks: &mut JoinSet<(usize, EvaluationOutcome)>,
    slots: &mut [Option<EvaluationOutcome>],
) {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, outcome)) => slots[idx] = Some(outcome),
            Err(e) => tracing::error!("evaluation task failed: {e}"),
        }
    }
}
