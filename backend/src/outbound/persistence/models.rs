//! Row structs bridging Diesel and the domain types.

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::domain::recipe::{Recipe, RecipeId};
use crate::domain::user::{PasswordHash, User, UserId};
use crate::domain::EmailAddress;

use super::schema::{auth_tokens, recipes, users};

/// Read shape for the `users` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl UserRow {
    /// Convert to the domain aggregate.
    ///
    /// The stored email was normalised on insert; re-running normalisation
    /// is a no-op and keeps the invariant explicit.
    pub fn into_domain(self) -> Result<User, crate::domain::EmailValidationError> {
        Ok(User {
            id: UserId::new(self.id),
            email: EmailAddress::new(self.email)?,
            password_hash: PasswordHash::new(self.password_hash),
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
        })
    }
}

/// Insert shape for the `users` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Insert shape for the `auth_tokens` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = auth_tokens)]
pub struct NewTokenRow<'a> {
    pub digest: &'a str,
    pub user_id: i64,
}

/// Read shape for the `recipes` table.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: RecipeId::new(row.id),
            owner: UserId::new(row.user_id),
            title: row.title,
            // Non-negative by CHECK constraint.
            time_minutes: u32::try_from(row.time_minutes).unwrap_or_default(),
            price: row.price,
            description: row.description,
            link: row.link,
        }
    }
}

/// Insert shape for the `recipes` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = recipes)]
pub struct NewRecipeRow<'a> {
    pub user_id: i64,
    pub title: &'a str,
    pub time_minutes: i32,
    pub price: &'a BigDecimal,
    pub description: Option<&'a str>,
    pub link: Option<&'a str>,
}

/// Changeset for partial recipe updates; `None` fields are left untouched.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = recipes)]
pub struct RecipeChangesRow {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<BigDecimal>,
    pub description: Option<String>,
    pub link: Option<String>,
}
