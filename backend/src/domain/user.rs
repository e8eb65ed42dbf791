//! User aggregate and its identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::email::EmailAddress;

/// Stable user identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque one-way password hash.
///
/// The domain never inspects the encoded format; only the hasher port can
/// produce or verify one. `Debug` redacts the contents so hashes never leak
/// into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by the hasher port or loaded from
    /// storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash for verification or persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Identifier assigned on insert.
    pub id: UserId,
    /// Normalised, unique email address.
    pub email: EmailAddress,
    /// One-way hash of the account password.
    pub password_hash: PasswordHash,
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
    /// Staff accounts may access administrative tooling.
    pub is_staff: bool,
    /// Superusers bypass per-object permissions.
    pub is_superuser: bool,
}

/// Field set for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl NewUser {
    /// A regular account: active, neither staff nor superuser.
    pub fn regular(email: EmailAddress, password_hash: PasswordHash) -> Self {
        Self {
            email,
            password_hash,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// A superuser account: active, staff, and superuser.
    pub fn superuser(email: EmailAddress, password_hash: PasswordHash) -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
            ..Self::regular(email, password_hash)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn email() -> EmailAddress {
        EmailAddress::new("test@example.com").expect("valid email")
    }

    #[rstest]
    fn regular_accounts_default_to_active_only() {
        let user = NewUser::regular(email(), PasswordHash::new("$x"));
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
    }

    #[rstest]
    fn superuser_accounts_set_both_flags() {
        let user = NewUser::superuser(email(), PasswordHash::new("$x"));
        assert!(user.is_active);
        assert!(user.is_staff);
        assert!(user.is_superuser);
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let rendered = format!("{:?}", PasswordHash::new("$argon2id$secret"));
        assert_eq!(rendered, "PasswordHash(..)");
    }
}
