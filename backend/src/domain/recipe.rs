//! Recipe aggregate and its write shapes.

use std::fmt;

use bigdecimal::BigDecimal;

use super::user::UserId;

/// Stable recipe identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted recipe owned by exactly one user.
///
/// ## Invariants
/// - `owner` is set on creation and never changes.
/// - `time_minutes` is non-negative by type.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub owner: UserId,
    pub title: String,
    pub time_minutes: u32,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Field set for creating a recipe; the owner is supplied separately by the
/// endpoint so callers can never set ownership through a payload.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub time_minutes: u32,
    pub price: BigDecimal,
    pub description: Option<String>,
    pub link: Option<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub time_minutes: Option<u32>,
    pub price: Option<BigDecimal>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl RecipeChanges {
    /// True when no field is present; storage layers reject empty updates.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.time_minutes.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.link.is_none()
    }
}

impl From<RecipeDraft> for RecipeChanges {
    fn from(draft: RecipeDraft) -> Self {
        Self {
            title: Some(draft.title),
            time_minutes: Some(draft.time_minutes),
            price: Some(draft.price),
            description: draft.description,
            link: draft.link,
        }
    }
}

impl Recipe {
    /// Apply a change set, leaving absent fields untouched.
    pub fn apply(&mut self, changes: RecipeChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(time_minutes) = changes.time_minutes {
            self.time_minutes = time_minutes;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(link) = changes.link {
            self.link = Some(link);
        }
    }
}
