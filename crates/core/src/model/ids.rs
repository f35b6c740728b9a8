use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a tutorial section, unique within its stack.
///
/// Doubles as the DOM anchor of the rendered section and as the member
/// stored in a stack's completed set.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionId(String);

/// Error type for section ids that are empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("section id must not be empty")]
pub struct ParseSectionIdError;

impl SectionId {
    /// Creates a validated `SectionId` (trimmed, non-empty).
    ///
    /// # Errors
    ///
    /// Returns `ParseSectionIdError` if the value is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseSectionIdError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseSectionIdError);
        }
        if trimmed.len() == raw.len() {
            return Ok(Self(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Builds an id from a compile-time literal.
    ///
    /// Intended for static catalog data and tests, where the literal is known
    /// to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `value` is empty after trimming.
    #[must_use]
    pub fn from_static(value: &'static str) -> Self {
        match Self::new(value) {
            Ok(id) => id,
            Err(_) => panic!("static section id must not be empty"),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SectionId {
    type Err = ParseSectionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SectionId {
    type Error = ParseSectionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SectionId> for String {
    fn from(value: SectionId) -> Self {
        value.0
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
