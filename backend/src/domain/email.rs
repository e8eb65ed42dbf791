//! Validated, normalised email addresses.
//!
//! Normalisation lower-cases only the domain part (everything after the last
//! `@`) and leaves the local part untouched, so `Test2@Example.com` becomes
//! `Test2@example.com`. Addresses without an `@` pass through unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Address was missing or blank once trimmed.
    #[error("email address must not be empty")]
    Empty,
}

/// A normalised email address.
///
/// ## Invariants
/// - Never empty.
/// - The domain part (after the last `@`) is lower-cased; the local part
///   keeps its original casing byte for byte.
///
/// # Examples
/// ```
/// use backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("Test2@Example.com").expect("valid email");
/// assert_eq!(email.as_str(), "Test2@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmailValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }

        let normalised = match trimmed.rsplit_once('@') {
            Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
            None => trimmed.to_owned(),
        };

        Ok(Self(normalised))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
