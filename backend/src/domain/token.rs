//! Bearer token material and its stored digest.
//!
//! The raw token is handed to the client exactly once; only its SHA-256
//! digest is persisted, so a leaked token table cannot be replayed directly.

use std::fmt;

use sha2::{Digest, Sha256};
use uuid::Uuid;
use zeroize::Zeroizing;

/// An opaque bearer token as presented by a client.
///
/// The inner value is zeroed on drop. `Debug` redacts the contents.
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a raw token received from a client.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Generate fresh token material.
    pub fn generate() -> Self {
        let raw = format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        );
        Self(Zeroizing::new(raw))
    }

    /// Reveal the raw token, e.g. to return it to the client once.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Digest used for storage and lookup.
    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(self.expose())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Hex-encoded SHA-256 digest of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Digest raw token material.
    pub fn of(raw: &str) -> Self {
        Self(hex::encode(Sha256::digest(raw.as_bytes())))
    }

    /// Wrap a digest loaded from storage.
    pub fn from_hex(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the hex encoding.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_tokens_are_unique() {
        let first = AccessToken::generate();
        let second = AccessToken::generate();
        assert_ne!(first.expose(), second.expose());
        assert_eq!(first.expose().len(), 64);
    }

    #[rstest]
    fn digest_is_stable_for_equal_material() {
        let token = AccessToken::new("material");
        assert_eq!(token.digest(), TokenDigest::of("material"));
        assert_ne!(token.digest(), TokenDigest::of("other"));
    }

    #[rstest]
    fn digest_is_hex_sha256() {
        // Well-known SHA-256 of the empty string.
        assert_eq!(
            TokenDigest::of("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let rendered = format!("{:?}", AccessToken::new("secret"));
        assert_eq!(rendered, "AccessToken(..)");
    }
}
