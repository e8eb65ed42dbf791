//! PostgreSQL-backed [`TokenRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, TokenRepository};
use crate::domain::token::TokenDigest;
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewTokenRow;
use super::pool::DbPool;
use super::schema::auth_tokens;

/// Diesel-backed token repository; rows hold digests only.
#[derive(Clone)]
pub struct DieselTokenRepository {
    pool: DbPool,
}

impl DieselTokenRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for DieselTokenRepository {
    async fn store(&self, digest: TokenDigest, user: UserId) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewTokenRow {
            digest: digest.as_str(),
            user_id: user.get(),
        };

        diesel::insert_into(auth_tokens::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn resolve(&self, digest: &TokenDigest) -> Result<Option<UserId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id: Option<i64> = auth_tokens::table
            .find(digest.as_str())
            .select(auth_tokens::user_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(user_id.map(UserId::new))
    }
}
