//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::domain::ports::{
    AccountManager, AttributeRepository, AuthGate, RecipeRepository, TokenRepository,
    UserRepository,
};
use crate::domain::{AccountService, Ingredient, Tag};
use crate::outbound::memory::{
    MemoryIngredientRepository, MemoryRecipeRepository, MemoryTagRepository,
    MemoryTokenRepository, MemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselTagRepository,
    DieselTokenRepository, DieselUserRepository,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Ports the HTTP handlers drive, behind trait objects so tests and the
/// dev-mode server can swap adapters without touching handler code.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountManager>,
    pub auth: Arc<dyn AuthGate>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub tags: Arc<dyn AttributeRepository<Tag>>,
    pub ingredients: Arc<dyn AttributeRepository<Ingredient>>,
}

impl HttpState {
    fn assemble(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        recipes: Arc<dyn RecipeRepository>,
        tags: Arc<dyn AttributeRepository<Tag>>,
        ingredients: Arc<dyn AttributeRepository<Ingredient>>,
    ) -> Self {
        let service = Arc::new(AccountService::new(
            users,
            tokens,
            Arc::new(Argon2PasswordHasher),
        ));
        Self {
            accounts: service.clone(),
            auth: service,
            recipes,
            tags,
            ingredients,
        }
    }

    /// Wire the Diesel adapters over a shared connection pool.
    pub fn with_pool(pool: DbPool) -> Self {
        Self::assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTokenRepository::new(pool.clone())),
            Arc::new(DieselRecipeRepository::new(pool.clone())),
            Arc::new(DieselTagRepository::new(pool.clone())),
            Arc::new(DieselIngredientRepository::new(pool)),
        )
    }

    /// Wire in-memory adapters. State lives for the process only; used by
    /// handler tests and by the server when no database is configured.
    pub fn in_memory() -> Self {
        Self::assemble(
            Arc::new(MemoryUserRepository::default()),
            Arc::new(MemoryTokenRepository::default()),
            Arc::new(MemoryRecipeRepository::default()),
            Arc::new(MemoryTagRepository::default()),
            Arc::new(MemoryIngredientRepository::default()),
        )
    }
}
