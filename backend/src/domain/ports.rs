//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (databases, password hashers) and how inbound adapters drive the domain.
//! Each driven trait exposes a typed error so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.
//!
//! Ownership scoping is structural: every accessor that touches owned rows
//! takes the owner's [`UserId`], so a foreign row is simply absent from the
//! reachable set and surfaces as not-found rather than forbidden.

use async_trait::async_trait;
use thiserror::Error;

use super::attribute::{AttributeId, RecipeAttribute};
use super::auth::LoginCredentials;
use super::email::EmailAddress;
use super::error::Error as DomainError;
use super::recipe::{Recipe, RecipeChanges, RecipeDraft, RecipeId};
use super::token::{AccessToken, TokenDigest};
use super::user::{NewUser, PasswordHash, User, UserId};

/// Persistence errors raised by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Repository connection could not be established.
    #[error("repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query { message: String },
    /// A uniqueness constraint rejected the write.
    #[error("repository conflict: {message}")]
    Conflict { message: String },
}

impl RepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for DomainError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => {
                Self::service_unavailable(format!("repository unavailable: {message}"))
            }
            RepositoryError::Query { message } => {
                Self::internal(format!("repository error: {message}"))
            }
            RepositoryError::Conflict { message } => Self::conflict(message),
        }
    }
}

/// Errors raised by the password hasher adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HasherError {
    /// Hashing the candidate password failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

impl HasherError {
    /// Helper for hash failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// One-way, salted password hashing.
///
/// The domain never inspects the encoded format.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext candidate.
    fn hash(&self, raw: &str) -> Result<PasswordHash, HasherError>;

    /// Verify a plaintext candidate against a stored hash.
    fn verify(&self, raw: &str, hash: &PasswordHash) -> bool;
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, returning the persisted record.
    ///
    /// A duplicate email yields [`RepositoryError::Conflict`] and no write.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;
}

/// Persistence port for issued bearer tokens, keyed by digest.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Record a token digest for the given user.
    async fn store(&self, digest: TokenDigest, user: UserId) -> Result<(), RepositoryError>;

    /// Resolve a presented digest to its owning user, if any.
    async fn resolve(&self, digest: &TokenDigest) -> Result<Option<UserId>, RepositoryError>;
}

/// Persistence port for recipes, scoped to their owner.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a recipe for the owner, returning the persisted record.
    async fn insert(&self, owner: UserId, draft: RecipeDraft) -> Result<Recipe, RepositoryError>;

    /// List the owner's recipes, most recently created first (descending id).
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RepositoryError>;

    /// Fetch one of the owner's recipes by id.
    async fn find_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RepositoryError>;

    /// Apply changes to one of the owner's recipes; `None` when absent.
    async fn update_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, RepositoryError>;

    /// Delete one of the owner's recipes; `false` when absent.
    async fn delete_for_owner(&self, owner: UserId, id: RecipeId)
    -> Result<bool, RepositoryError>;
}

/// Persistence port for recipe attributes, instantiated per attribute type.
#[async_trait]
pub trait AttributeRepository<A: RecipeAttribute>: Send + Sync {
    /// Insert an attribute for the owner, returning the persisted record.
    async fn insert(&self, owner: UserId, name: String) -> Result<A, RepositoryError>;

    /// List the owner's attributes, ordered by descending name.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<A>, RepositoryError>;

    /// Fetch one of the owner's attributes by id.
    async fn find_for_owner(
        &self,
        owner: UserId,
        id: AttributeId,
    ) -> Result<Option<A>, RepositoryError>;

    /// Rename one of the owner's attributes; `None` when absent.
    async fn rename_for_owner(
        &self,
        owner: UserId,
        id: AttributeId,
        name: String,
    ) -> Result<Option<A>, RepositoryError>;

    /// Delete one of the owner's attributes; `false` when absent.
    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: AttributeId,
    ) -> Result<bool, RepositoryError>;
}

/// Driving port: account lifecycle operations.
#[async_trait]
pub trait AccountManager: Send + Sync {
    /// Create a regular account. Fails with a validation error on an empty
    /// email and a conflict on a duplicate one; nothing is persisted on
    /// failure.
    async fn create_user(&self, email: &str, password: &str) -> Result<User, DomainError>;

    /// Create a staff + superuser account.
    async fn create_superuser(&self, email: &str, password: &str) -> Result<User, DomainError>;

    /// Verify credentials and issue a fresh bearer token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, DomainError>;
}

/// Driving port: resolve a presented bearer token to its user.
///
/// The HTTP layer trusts the returned identity unconditionally.
#[async_trait]
pub trait AuthGate: Send + Sync {
    /// Resolve a raw token; `None` when unknown, revoked, or inactive.
    async fn resolve(&self, token: &AccessToken) -> Result<Option<User>, DomainError>;
}
