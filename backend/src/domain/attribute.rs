//! Recipe attributes: tags and ingredients.
//!
//! Both are named, user-owned records with identical list/rename/delete
//! behaviour, so the shared shape is abstracted behind [`RecipeAttribute`]
//! and repositories and handlers are written once against it.

use std::fmt;

use super::user::UserId;

/// Stable attribute identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(i64);

impl AttributeId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, user-owned recipe attribute.
///
/// Implemented by [`Tag`] and [`Ingredient`]; repositories and HTTP handlers
/// are generic over this trait so the ownership-scoped behaviour exists in
/// one place.
pub trait RecipeAttribute: Clone + Send + Sync + 'static {
    /// Resource name used in log lines and error messages.
    const RESOURCE: &'static str;

    /// Construct a persisted attribute from its parts.
    fn from_parts(id: AttributeId, owner: UserId, name: String) -> Self;

    /// Identifier assigned on insert.
    fn id(&self) -> AttributeId;

    /// Owning user.
    fn owner(&self) -> UserId;

    /// Display name.
    fn name(&self) -> &str;
}

/// A recipe tag, e.g. `Vegan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: AttributeId,
    pub owner: UserId,
    pub name: String,
}

impl RecipeAttribute for Tag {
    const RESOURCE: &'static str = "tag";

    fn from_parts(id: AttributeId, owner: UserId, name: String) -> Self {
        Self { id, owner, name }
    }

    fn id(&self) -> AttributeId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A recipe ingredient, e.g. `Salt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: AttributeId,
    pub owner: UserId,
    pub name: String,
}

impl RecipeAttribute for Ingredient {
    const RESOURCE: &'static str = "ingredient";

    fn from_parts(id: AttributeId, owner: UserId, name: String) -> Self {
        Self { id, owner, name }
    }

    fn id(&self) -> AttributeId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
