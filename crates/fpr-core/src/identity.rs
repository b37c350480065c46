//! # Identity Newtypes
//!
//! Rule names and handbook identifiers are distinct types so that the
//! many-to-many rule ↔ handbook relation cannot be indexed with the wrong
//! key. Both validate at construction and on deserialization: an empty
//! identifier never enters the system.
//!
//! Both are ordered (`Ord`) so reports can hold them in `BTreeSet`s and
//! serialize in a stable order.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique name of a compliance rule, e.g. `"Risk Warnings"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    /// Create a rule name, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRuleName`] on blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyRuleName);
        }
        Ok(Self(s))
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RuleName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RuleName> for String {
    fn from(value: RuleName) -> Self {
        value.0
    }
}

impl Borrow<str> for RuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a regulatory handbook, e.g. `"FCA PRIN"`.
///
/// A handbook is not a first-class object: it exists only as the grouping
/// key that rules declare membership in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HandbookId(String);

impl HandbookId {
    /// Create a handbook identifier, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHandbook`] on blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyHandbook);
        }
        Ok(Self(s))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HandbookId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HandbookId> for String {
    fn from(value: HandbookId) -> Self {
        value.0
    }
}

impl Borrow<str> for HandbookId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandbookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
