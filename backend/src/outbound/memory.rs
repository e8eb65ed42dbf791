//! In-memory implementations of the persistence ports.
//!
//! Used by the handler tests and by the dev-mode server when no database is
//! configured. The scoping rule lives once in [`OwnedStore`]: every accessor
//! filters on the owner before anything else, so foreign rows are
//! unreachable here exactly as they are in the SQL adapters.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::attribute::{AttributeId, RecipeAttribute};
use crate::domain::email::EmailAddress;
use crate::domain::ports::{
    AttributeRepository, RecipeRepository, RepositoryError, TokenRepository, UserRepository,
};
use crate::domain::recipe::{Recipe, RecipeChanges, RecipeDraft, RecipeId};
use crate::domain::token::TokenDigest;
use crate::domain::user::{NewUser, User, UserId};

/// Rows plus a monotonically increasing id counter.
///
/// Locking recovers from poisoning: rows hold no invariants that a panicking
/// writer could have broken half-way, so the data is still usable.
struct OwnedStore<T> {
    rows: Mutex<Vec<T>>,
    next_id: AtomicI64,
}

impl<T> Default for OwnedStore<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: Clone> OwnedStore<T> {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn with_rows<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut guard = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// The owner's rows only, in insertion order.
    fn owned(&self, owner: UserId, owner_of: impl Fn(&T) -> UserId) -> Vec<T> {
        self.with_rows(|rows| {
            rows.iter()
                .filter(|row| owner_of(row) == owner)
                .cloned()
                .collect()
        })
    }
}

/// In-memory [`UserRepository`].
#[derive(Default)]
pub struct MemoryUserRepository {
    store: OwnedStore<User>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        self.store.with_rows(|rows| {
            if rows.iter().any(|existing| existing.email == user.email) {
                return Err(RepositoryError::conflict("email already registered"));
            }
            let created = User {
                id: UserId::new(self.store.next_id.fetch_add(1, Ordering::Relaxed)),
                email: user.email,
                password_hash: user.password_hash,
                is_active: user.is_active,
                is_staff: user.is_staff,
                is_superuser: user.is_superuser,
            };
            rows.push(created.clone());
            Ok(created)
        })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .store
            .with_rows(|rows| rows.iter().find(|user| user.id == id).cloned()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .store
            .with_rows(|rows| rows.iter().find(|user| &user.email == email).cloned()))
    }
}

/// In-memory [`TokenRepository`] keyed by digest.
#[derive(Default)]
pub struct MemoryTokenRepository {
    tokens: Mutex<HashMap<TokenDigest, UserId>>,
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn store(&self, digest: TokenDigest, user: UserId) -> Result<(), RepositoryError> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(digest, user);
        Ok(())
    }

    async fn resolve(&self, digest: &TokenDigest) -> Result<Option<UserId>, RepositoryError> {
        Ok(self
            .tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(digest)
            .copied())
    }
}

/// In-memory [`RecipeRepository`].
#[derive(Default)]
pub struct MemoryRecipeRepository {
    store: OwnedStore<Recipe>,
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn insert(&self, owner: UserId, draft: RecipeDraft) -> Result<Recipe, RepositoryError> {
        let created = Recipe {
            id: RecipeId::new(self.store.next_id()),
            owner,
            title: draft.title,
            time_minutes: draft.time_minutes,
            price: draft.price,
            description: draft.description,
            link: draft.link,
        };
        let stored = created.clone();
        self.store.with_rows(|rows| rows.push(stored));
        Ok(created)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Recipe>, RepositoryError> {
        let mut recipes = self.store.owned(owner, |recipe| recipe.owner);
        recipes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(recipes)
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.store.with_rows(|rows| {
            rows.iter()
                .find(|recipe| recipe.owner == owner && recipe.id == id)
                .cloned()
        }))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.store.with_rows(|rows| {
            rows.iter_mut()
                .find(|recipe| recipe.owner == owner && recipe.id == id)
                .map(|recipe| {
                    recipe.apply(changes);
                    recipe.clone()
                })
        }))
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: RecipeId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.store.with_rows(|rows| {
            let before = rows.len();
            rows.retain(|recipe| !(recipe.owner == owner && recipe.id == id));
            rows.len() < before
        }))
    }
}

/// In-memory [`AttributeRepository`], shared by tags and ingredients.
pub struct MemoryAttributeRepository<A> {
    store: OwnedStore<A>,
}

impl<A> Default for MemoryAttributeRepository<A> {
    fn default() -> Self {
        Self {
            store: OwnedStore::default(),
        }
    }
}

#[async_trait]
impl<A: RecipeAttribute> AttributeRepository<A> for MemoryAttributeRepository<A> {
    async fn insert(&self, owner: UserId, name: String) -> Result<A, RepositoryError> {
        let created = A::from_parts(AttributeId::new(self.store.next_id()), owner, name);
        let stored = created.clone();
        self.store.with_rows(|rows| rows.push(stored));
        Ok(created)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<A>, RepositoryError> {
        let mut attributes = self.store.owned(owner, RecipeAttribute::owner);
        attributes.sort_by(|a, b| b.name().cmp(a.name()));
        Ok(attributes)
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: AttributeId,
    ) -> Result<Option<A>, RepositoryError> {
        Ok(self.store.with_rows(|rows| {
            rows.iter()
                .find(|attr| attr.owner() == owner && attr.id() == id)
                .cloned()
        }))
    }

    async fn rename_for_owner(
        &self,
        owner: UserId,
        id: AttributeId,
        name: String,
    ) -> Result<Option<A>, RepositoryError> {
        Ok(self.store.with_rows(|rows| {
            rows.iter_mut()
                .find(|attr| attr.owner() == owner && attr.id() == id)
                .map(|attr| {
                    *attr = A::from_parts(id, owner, name);
                    attr.clone()
                })
        }))
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: AttributeId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.store.with_rows(|rows| {
            let before = rows.len();
            rows.retain(|attr| !(attr.owner() == owner && attr.id() == id));
            rows.len() < before
        }))
    }
}

/// In-memory tag repository.
pub type MemoryTagRepository = MemoryAttributeRepository<crate::domain::Tag>;
/// In-memory ingredient repository.
pub type MemoryIngredientRepository = MemoryAttributeRepository<crate::domain::Ingredient>;
