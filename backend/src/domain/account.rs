//! Account service: the domain side of user management.
//!
//! Implements the [`AccountManager`] and [`AuthGate`] driving ports over the
//! user, token, and hasher ports. All email normalisation and password
//! handling funnels through here so the HTTP layer stays a thin translation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::auth::LoginCredentials;
use super::email::{EmailAddress, EmailValidationError};
use super::error::Error;
use super::ports::{
    AccountManager, AuthGate, HasherError, PasswordHasher, TokenRepository, UserRepository,
};
use super::token::AccessToken;
use super::user::{NewUser, User};

/// Account service over the user, token, and hasher ports.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Create a new service with the given adapters.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    fn validated_email(raw: &str) -> Result<EmailAddress, Error> {
        EmailAddress::new(raw).map_err(|err| match err {
            EmailValidationError::Empty => Error::invalid_request("email must not be empty")
                .with_details(json!({ "field": "email", "code": "empty_email" })),
        })
    }

    fn map_hasher_error(error: HasherError) -> Error {
        let HasherError::Hash { message } = error;
        Error::internal(format!("password hashing failed: {message}"))
    }

    async fn insert(&self, user: NewUser) -> Result<User, Error> {
        let email = user.email.clone();
        let created = self.users.insert(user).await.map_err(Error::from)?;
        debug!(user_id = %created.id, email = %email, "account created");
        Ok(created)
    }
}

#[async_trait]
impl AccountManager for AccountService {
    async fn create_user(&self, email: &str, password: &str) -> Result<User, Error> {
        let email = Self::validated_email(email)?;
        let hash = self.hasher.hash(password).map_err(Self::map_hasher_error)?;
        self.insert(NewUser::regular(email, hash)).await
    }

    async fn create_superuser(&self, email: &str, password: &str) -> Result<User, Error> {
        let email = Self::validated_email(email)?;
        let hash = self.hasher.hash(password).map_err(Self::map_hasher_error)?;
        self.insert(NewUser::superuser(email, hash)).await
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AccessToken, Error> {
        let email = Self::validated_email(credentials.email())?;
        let user = self.users.find_by_email(&email).await.map_err(Error::from)?;

        // One rejection path for unknown users, wrong passwords, and
        // deactivated accounts so the response does not reveal which.
        let verified = user.filter(|user| {
            user.is_active && self.hasher.verify(credentials.password(), &user.password_hash)
        });
        let Some(user) = verified else {
            return Err(Error::unauthorized("invalid credentials"));
        };

        let token = AccessToken::generate();
        self.tokens
            .store(token.digest(), user.id)
            .await
            .map_err(Error::from)?;
        debug!(user_id = %user.id, "token issued");
        Ok(token)
    }
}

#[async_trait]
impl AuthGate for AccountService {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<User>, Error> {
        let Some(user_id) = self
            .tokens
            .resolve(&token.digest())
            .await
            .map_err(Error::from)?
        else {
            return Ok(None);
        };

        let user = self.users.find_by_id(user_id).await.map_err(Error::from)?;
        Ok(user.filter(|user| user.is_active))
    }
}
