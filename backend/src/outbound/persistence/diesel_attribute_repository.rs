//! PostgreSQL-backed [`AttributeRepository`] implementations using Diesel.
//!
//! Tags and ingredients share identical storage behaviour over structurally
//! identical tables; the macro stamps out one adapter per table so the query
//! logic is written once.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::attribute::{AttributeId, Ingredient, RecipeAttribute, Tag};
use crate::domain::ports::{AttributeRepository, RepositoryError};
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{ingredients, tags};

macro_rules! diesel_attribute_repository {
    ($repo:ident, $attribute:ty, $table:ident) => {
        /// Diesel-backed repository for one attribute table.
        #[derive(Clone)]
        pub struct $repo {
            pool: DbPool,
        }

        impl $repo {
            /// Create a new repository with the given connection pool.
            pub fn new(pool: DbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl AttributeRepository<$attribute> for $repo {
            async fn insert(
                &self,
                owner: UserId,
                name: String,
            ) -> Result<$attribute, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let (id, name): (i64, String) = diesel::insert_into($table::table)
                    .values(($table::user_id.eq(owner.get()), $table::name.eq(name)))
                    .returning(($table::id, $table::name))
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                Ok(<$attribute>::from_parts(AttributeId::new(id), owner, name))
            }

            async fn list_for_owner(
                &self,
                owner: UserId,
            ) -> Result<Vec<$attribute>, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let rows: Vec<(i64, String)> = $table::table
                    .filter($table::user_id.eq(owner.get()))
                    .order($table::name.desc())
                    .select(($table::id, $table::name))
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                Ok(rows
                    .into_iter()
                    .map(|(id, name)| {
                        <$attribute>::from_parts(AttributeId::new(id), owner, name)
                    })
                    .collect())
            }

            async fn find_for_owner(
                &self,
                owner: UserId,
                id: AttributeId,
            ) -> Result<Option<$attribute>, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let row: Option<String> = $table::table
                    .filter($table::user_id.eq(owner.get()))
                    .filter($table::id.eq(id.get()))
                    .select($table::name)
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;

                Ok(row.map(|name| <$attribute>::from_parts(id, owner, name)))
            }

            async fn rename_for_owner(
                &self,
                owner: UserId,
                id: AttributeId,
                name: String,
            ) -> Result<Option<$attribute>, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let renamed: Option<String> = diesel::update(
                    $table::table
                        .filter($table::user_id.eq(owner.get()))
                        .filter($table::id.eq(id.get())),
                )
                .set($table::name.eq(name))
                .returning($table::name)
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

                Ok(renamed.map(|name| <$attribute>::from_parts(id, owner, name)))
            }

            async fn delete_for_owner(
                &self,
                owner: UserId,
                id: AttributeId,
            ) -> Result<bool, RepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;

                let deleted = diesel::delete(
                    $table::table
                        .filter($table::user_id.eq(owner.get()))
                        .filter($table::id.eq(id.get())),
                )
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

                Ok(deleted > 0)
            }
        }
    };
}

diesel_attribute_repository!(DieselTagRepository, Tag, tags);
diesel_attribute_repository!(DieselIngredientRepository, Ingredient, ingredients);
