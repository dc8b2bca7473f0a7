//! Person name type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Pattern is a compile-time constant
    Regex::new(r"^[a-zA-Z\s]*$").unwrap()
});

/// Errors that can occur when parsing a [`PersonName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input string is empty.
    #[error("name cannot be empty")]
    Empty,
    /// The input contains something other than letters and whitespace.
    #[error("name must only contain letters and spaces")]
    InvalidCharacters,
}

/// A person's display name: ASCII letters and whitespace only.
///
/// ```
/// use profile_directory_core::PersonName;
///
/// assert!(PersonName::parse("Ann Lee").is_ok());
/// assert!(PersonName::parse("R2D2").is_err());
/// assert!(PersonName::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Returns `true` if `s` is acceptable as partially typed name input.
    ///
    /// The empty string is accepted so an operator can clear the field.
    #[must_use]
    pub fn is_valid_input(s: &str) -> bool {
        NAME_PATTERN.is_match(s)
    }

    /// Parse a `PersonName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains anything other than
    /// letters and whitespace.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        if s.is_empty() {
            return Err(NameError::Empty);
        }
        if !Self::is_valid_input(s) {
            return Err(NameError::InvalidCharacters);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PersonName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PersonName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
