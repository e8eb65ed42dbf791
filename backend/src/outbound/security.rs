//! Argon2id implementation of the password hasher port.
//!
//! Hashes are stored in the PHC string format (`$argon2id$...`), which
//! embeds the salt and parameters, so verification needs no side channel.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
    rand_core::OsRng,
};

use crate::domain::ports::{HasherError, PasswordHasher};
use crate::domain::user::PasswordHash;

/// Argon2id hasher with the library's default parameters.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, raw: &str) -> Result<PasswordHash, HasherError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| PasswordHash::new(hash.to_string()))
            .map_err(|err| HasherError::hash(err.to_string()))
    }

    fn verify(&self, raw: &str, hash: &PasswordHash) -> bool {
        PhcHash::new(hash.as_str())
            .map(|parsed| {
                Argon2::default()
                    .verify_password(raw.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_verifies_and_is_salted() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("testpass123").expect("hash");
        let second = hasher.hash("testpass123").expect("hash");

        assert!(first.as_str().starts_with("$argon2id$"));
        // Fresh salt per hash.
        assert_ne!(first.as_str(), second.as_str());
        assert!(hasher.verify("testpass123", &first));
        assert!(!hasher.verify("wrong", &first));
    }

    #[rstest]
    fn malformed_stored_hash_never_verifies() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher.verify("anything", &PasswordHash::new("not-a-phc-string")));
    }
}
