//! Domain entities, ports, and services.
//!
//! Everything in this module is transport and storage agnostic. Inbound
//! adapters translate HTTP requests into calls on the driving ports
//! ([`ports::AccountManager`], [`ports::AuthGate`]) or the repositories;
//! outbound adapters implement the driven ports.

pub mod account;
pub mod attribute;
pub mod auth;
pub mod email;
pub mod error;
pub mod ports;
pub mod recipe;
pub mod token;
pub mod user;

pub use self::account::AccountService;
pub use self::attribute::{AttributeId, Ingredient, RecipeAttribute, Tag};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::email::{EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::recipe::{Recipe, RecipeChanges, RecipeDraft, RecipeId};
pub use self::token::{AccessToken, TokenDigest};
pub use self::user::{NewUser, PasswordHash, User, UserId};

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("missing"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
