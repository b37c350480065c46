//! # Error Types -- Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. Catalog errors name the offending rule so a broken YAML
//! file can be fixed without re-reading the whole document.

use thiserror::Error;

/// Top-level error type for `fpr-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An identifier or rule failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Two rules in one catalog share a name.
    #[error("duplicate rule name in catalog: \"{0}\"")]
    DuplicateRule(String),

    /// The catalog contained no rules.
    #[error("rule catalog is empty")]
    EmptyCatalog,

    /// YAML catalog could not be parsed.
    #[error("catalog parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error while reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation failures for identifiers and rule definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Rule name was empty or whitespace only.
    #[error("rule name must not be empty")]
    EmptyRuleName,

    /// Handbook identifier was empty or whitespace only.
    #[error("handbook identifier must not be empty")]
    EmptyHandbook,

    /// A rule was declared without any handbook.
    #[error("rule \"{0}\" must belong to at least one handbook")]
    NoHandbooks(String),

    /// A rule was declared without any text.
    #[error("rule \"{0}\" has no text")]
    EmptyRuleText(String),
}
