//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("test@example.com", "testpass123").unwrap();
/// assert_eq!(creds.email(), "test@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalised = email.trim();
        if normalised.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalised.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for user lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("a@b.com", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_parts(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password).expect_err("invalid input");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn trims_email_but_not_password() {
        let creds =
            LoginCredentials::try_from_parts("  test@example.com ", " pw ").expect("valid input");
        assert_eq!(creds.email(), "test@example.com");
        assert_eq!(creds.password(), " pw ");
    }
}
