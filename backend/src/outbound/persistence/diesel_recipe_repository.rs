//! PostgreSQL-backed [`RecipeRepository`] implementation using Diesel.
//!
//! Every query filters on `user_id` before anything else; the ownership
//! scope is part of each statement, never bolted on afterwards.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RecipeRepository, RepositoryError};
use crate::domain::recipe::{Recipe, RecipeChanges, RecipeDraft, RecipeId};
use crate::domain::user::UserId;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRecipeRow, RecipeChangesRow, RecipeRow};
use super::pool::DbPool;
use super::schema::recipes;

/// Diesel-backed recipe repository.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn minutes_to_db(minutes: u32) -> Result<i32, RepositoryError> {
    i32::try_from(minutes).map_err(|_| RepositoryError::query("time_minutes out of range"))
}

fn changes_to_row(changes: RecipeChanges) -> Result<RecipeChangesRow, RepositoryError> {
    Ok(RecipeChangesRow {
        title: changes.title,
        time_minutes: changes.time_minutes.map(minutes_to_db).transpose()?,
        price: changes.price,
        description: changes.description,
        link: changes.link,
    })
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn insert(&self, owner: UserId, draft: RecipeDraft) -> Result<Recipe, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewRecipeRow {
            user_id: owner.get(),
            title: draft.title.as_str(),
            time_minutes: minutes_to_db(draft.time_minutes)?,
            price: &draft.price,
            description: draft.description.as_deref(),
            link: draft.link.as_deref(),
        };

        let inserted: RecipeRow = diesel::insert_into(recipes::table)
            .values(&row)
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into())
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(owner.get()))
            .order(recipes::id.desc())
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecipeRow> = recipes::table
            .filter(recipes::user_id.eq(owner.get()))
            .filter(recipes::id.eq(id.get()))
            .select(RecipeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Recipe::from))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = changes_to_row(changes)?;
        let updated: Option<RecipeRow> = diesel::update(
            recipes::table
                .filter(recipes::user_id.eq(owner.get()))
                .filter(recipes::id.eq(id.get())),
        )
        .set(&row)
        .returning(RecipeRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        Ok(updated.map(Recipe::from))
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            recipes::table
                .filter(recipes::user_id.eq(owner.get()))
                .filter(recipes::id.eq(id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn minutes_conversion_guards_overflow() {
        assert_eq!(minutes_to_db(22).expect("fits"), 22);
        assert!(minutes_to_db(u32::MAX).is_err());
    }

    #[rstest]
    fn empty_changes_produce_empty_changeset() {
        let row = changes_to_row(RecipeChanges::default()).expect("convert");
        assert!(row.title.is_none());
        assert!(row.time_minutes.is_none());
        assert!(row.price.is_none());
        assert!(row.description.is_none());
        assert!(row.link.is_none());
    }
}
