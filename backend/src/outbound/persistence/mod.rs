//! PostgreSQL persistence adapters using Diesel.
//!
//! Each repository is a thin translator between domain types and rows; none
//! of them contains business logic. Ownership scoping is baked into every
//! statement via a `user_id` filter.

pub mod diesel_attribute_repository;
pub mod diesel_recipe_repository;
pub mod diesel_token_repository;
pub mod diesel_user_repository;
pub mod error_mapping;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_attribute_repository::{DieselIngredientRepository, DieselTagRepository};
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_token_repository::DieselTokenRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
