//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod attributes;
pub mod auth;
pub mod error;
pub mod ingredients;
pub mod recipes;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use crate::domain::ApiResult;

/// Register every API route. Mounted under `/api/v1` by the server and the
/// handler tests alike so the two never drift.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::create_token)
        .service(users::current_user)
        .service(recipes::list)
        .service(recipes::create)
        .service(recipes::retrieve)
        .service(recipes::replace)
        .service(recipes::update)
        .service(recipes::remove)
        .service(tags::list)
        .service(tags::replace)
        .service(tags::update)
        .service(tags::remove)
        .service(ingredients::list)
        .service(ingredients::replace)
        .service(ingredients::update)
        .service(ingredients::remove);
}
