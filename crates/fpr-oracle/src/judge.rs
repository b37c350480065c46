//! # Rule Judgment
//!
//! One call asks the model whether a document respects one rule. The answer
//! is a [`JudgmentResponse`]; semantic checks such as evidence/suggestion
//! pairing are the caller's job.

use async_trait::async_trait;
use fpr_core::Rule;
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatRequest};
use crate::error::OracleError;
use crate::{prompt, OracleClient};

/// Input to a single judgment call.
#[derive(Debug, Clone, Copy)]
pub struct JudgeRequest<'a> {
    pub rule: &'a Rule,
    pub document: &'a str,
}

impl<'a> JudgeRequest<'a> {
    pub fn new(rule: &'a Rule, document: &'a str) -> Self {
        Self { rule, document }
    }
}

/// Structured judgment as returned by the model.
///
/// `label` is `true` when the document respects the rule. `part` holds the
/// offending excerpts and `suggestion` the fix for each, position by
/// position. Both must be present, even if empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentResponse {
    /// Rule name as echoed by the model. Not trusted for attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    #[serde(deserialize_with = "crate::lenient::bool_or_text")]
    pub label: bool,
    pub part: Vec<String>,
    pub suggestion: Vec<String>,
}

/// Rules on whether a document respects a rule.
#[async_trait]
pub trait JudgmentOracle: Send + Sync {
    async fn judge(&self, request: JudgeRequest<'_>) -> Result<JudgmentResponse, OracleError>;
}

#[async_trait]
impl JudgmentOracle for OracleClient {
    async fn judge(&self, request: JudgeRequest<'_>) -> Result<JudgmentResponse, OracleError> {
        let rule = request.rule;
        tracing::debug!(rule = %rule.name(), model = %self.models.judge, "judging rule");

        let system = prompt::judge_system(&rule.description());
        let chat = ChatRequest::new(
            &self.models.judge,
            vec![
                ChatMessage::system(system),
                ChatMessage::user(prompt::transcript_user(request.document)),
            ],
        )
        .json_object();

        self.chat.complete_json(&chat).await
    }
}
