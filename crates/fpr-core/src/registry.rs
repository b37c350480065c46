//! # Rule Registry
//!
//! The immutable catalog of rules for a review run. Built once at process
//! initialization from the built-in FCA catalog or a YAML file, then shared
//! read-only (`Arc<RuleRegistry>`) by every concurrent evaluation.
//!
//! ## Handbook Index
//!
//! The registry precomputes `handbook → [rule index]` at construction. The
//! aggregator walks this index, so building per-handbook status costs
//! O(|handbooks| × |rules per handbook|) rather than scanning every rule for
//! every handbook.
//!
//! ## YAML Catalog Format
//!
//! ```yaml
//! rules:
//!   - name: Risk Warnings
//!     handbooks: [FCA CONC, FCA COBS]
//!     text: The video must include clear and prominent risk warnings...
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::FCA_RULES;
use crate::error::CoreError;
use crate::identity::{HandbookId, RuleName};
use crate::rule::Rule;

/// Immutable, validated set of rules with a handbook → rules index.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Arc<Rule>>,
    by_name: HashMap<RuleName, usize>,
    by_handbook: BTreeMap<HandbookId, Vec<usize>>,
    /// Handbooks in order of first declaration.
    handbook_order: Vec<HandbookId>,
}

#[derive(Deserialize)]
struct CatalogFile {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Build a registry from rules.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCatalog`] when no rules are given and
    /// [`CoreError::DuplicateRule`] when two rules share a name.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Self, CoreError> {
        let mut registry = Self {
            rules: Vec::new(),
            by_name: HashMap::new(),
            by_handbook: BTreeMap::new(),
            handbook_order: Vec::new(),
        };

        for rule in rules {
            let idx = registry.rules.len();
            if registry.by_name.insert(rule.name().clone(), idx).is_some() {
                return Err(CoreError::DuplicateRule(rule.name().to_string()));
            }
            for handbook in rule.handbooks() {
                let members = registry.by_handbook.entry(handbook.clone()).or_default();
                if members.is_empty() {
                    registry.handbook_order.push(handbook.clone());
                }
                members.push(idx);
            }
            registry.rules.push(Arc::new(rule));
        }

        if registry.rules.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(registry)
    }

    /// The built-in FCA financial-promotion catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the static catalog itself is malformed.
    pub fn fca_default() -> Result<Self, CoreError> {
        let rules = FCA_RULES
            .iter()
            .map(|(name, handbooks, text)| {
                let handbooks = handbooks
                    .iter()
                    .map(|h| HandbookId::new(*h))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Rule::new(RuleName::new(*name)?, handbooks, *text)?)
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Self::from_rules(rules)
    }

    /// Parse a YAML catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Yaml`] on malformed YAML or invalid rule
    /// definitions, plus any error from [`from_rules`](Self::from_rules).
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_rules(file.rules)
    }

    /// Load a YAML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be read, or any error
    /// from [`from_yaml_str`](Self::from_yaml_str).
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path)?;
        let registry = Self::from_yaml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            rules = registry.len(),
            handbooks = registry.handbook_count(),
            "loaded rule catalog"
        );
        Ok(registry)
    }

    /// All rules in declaration order.
    pub fn rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    /// Number of rules. Never zero.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`; a registry cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Rule>> {
        self.by_name.get(name).map(|&idx| &self.rules[idx])
    }

    /// Whether a rule with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Every handbook, sorted. Exactly the union of all rules' handbooks.
    pub fn handbooks(&self) -> impl Iterator<Item = &HandbookId> {
        self.by_handbook.keys()
    }

    /// Every handbook in order of first declaration.
    pub fn handbooks_in_order(&self) -> &[HandbookId] {
        &self.handbook_order
    }

    /// Number of distinct handbooks.
    pub fn handbook_count(&self) -> usize {
        self.by_handbook.len()
    }

    /// Rules scoped under `handbook`, in declaration order. Empty for an
    /// unknown handbook.
    pub fn rules_for<'a>(&'a self, handbook: &HandbookId) -> impl Iterator<Item = &'a Arc<Rule>> {
        self.by_handbook
            .get(handbook)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&idx| &self.rules[idx])
    }
}
