//! # Compliance Rules
//!
//! A [`Rule`] is a single compliance requirement scoped to one or more
//! handbooks. Rules are immutable once built: fields are private and only
//! exposed through accessors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{HandbookId, RuleName};

/// A single compliance requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleDefinition", into = "RuleDefinition")]
pub struct Rule {
    name: RuleName,
    /// Handbooks in declaration order, deduplicated.
    handbooks: Vec<HandbookId>,
    text: String,
}

impl Rule {
    /// Build a rule, validating that it belongs to at least one handbook and
    /// carries some text. Repeated handbooks are collapsed, keeping the first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoHandbooks`] or
    /// [`ValidationError::EmptyRuleText`].
    pub fn new(
        name: RuleName,
        handbooks: impl IntoIterator<Item = HandbookId>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let mut seen = BTreeSet::new();
        let handbooks: Vec<HandbookId> = handbooks
            .into_iter()
            .filter(|h| seen.insert(h.clone()))
            .collect();
        if handbooks.is_empty() {
            return Err(ValidationError::NoHandbooks(name.to_string()));
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyRuleText(name.to_string()));
        }
        Ok(Self {
            name,
            handbooks,
            text,
        })
    }

    /// The rule's unique name.
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// Handbooks this rule is scoped under, in declaration order.
    pub fn handbooks(&self) -> &[HandbookId] {
        &self.handbooks
    }

    /// The natural-language rule definition.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Full rule description sent to the judgment oracle: `"<name>: <text>"`.
    pub fn description(&self) -> String {
        format!("{}: {}", self.name, self.text)
    }
}

/// Serialized form of a rule, as it appears in YAML catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    pub handbooks: Vec<String>,
    pub text: String,
}

impl TryFrom<RuleDefinition> for Rule {
    type Error = ValidationError;

    fn try_from(def: RuleDefinition) -> Result<Self, Self::Error> {
        let name = RuleName::new(def.name)?;
        let handbooks = def
            .handbooks
            .into_iter()
            .map(HandbookId::new)
            .collect::<Result<Vec<_>, _>>()?;
        Rule::new(name, handbooks, def.text)
    }
}

impl From<Rule> for RuleDefinition {
    fn from(rule: Rule) -> Self {
        Self {
            name: rule.name.into(),
            handbooks: rule.handbooks.into_iter().map(String::from).collect(),
            text: rule.text,
        }
    }
}
