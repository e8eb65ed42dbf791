//! PostgreSQL-backed [`UserRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::email::EmailAddress;
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::user::{NewUser, User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed user repository.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_stored_email_error(error: crate::domain::EmailValidationError) -> RepositoryError {
    RepositoryError::query(format!("stored email failed validation: {error}"))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        inserted.into_domain().map_err(map_stored_email_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(UserRow::into_domain)
            .transpose()
            .map_err(map_stored_email_error)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(UserRow::into_domain)
            .transpose()
            .map_err(map_stored_email_error)
    }
}
