//! Ingredient API handlers.
//!
//! Same shape as the tag endpoints; see [`attributes`](super::attributes)
//! for the shared behaviour.

use actix_web::{HttpResponse, delete, get, patch, put, web};

use crate::domain::{Error, Ingredient};
use crate::inbound::http::ApiResult;
use crate::inbound::http::attributes::{
    AttributeResponse, AttributeWrite, list_core, remove_core, rename_core,
};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// List the caller's ingredients, reverse-alphabetical.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    responses(
        (status = 200, description = "The caller's ingredients", body = [AttributeResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AttributeResponse>>> {
    Ok(web::Json(list_core::<Ingredient>(&identity, &state).await?))
}

/// Rename one of the caller's ingredients.
#[utoipa::path(
    put,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = AttributeWrite,
    responses(
        (status = 200, description = "Renamed ingredient", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "replaceIngredient"
)]
#[put("/ingredients/{id}")]
pub async fn replace(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AttributeWrite>,
) -> ApiResult<web::Json<AttributeResponse>> {
    let renamed =
        rename_core::<Ingredient>(&identity, &state, path.into_inner(), payload.into_inner())
            .await?;
    Ok(web::Json(renamed))
}

/// Rename one of the caller's ingredients (partial update form).
#[utoipa::path(
    patch,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    request_body = AttributeWrite,
    responses(
        (status = 200, description = "Renamed ingredient", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "updateIngredient"
)]
#[patch("/ingredients/{id}")]
pub async fn update(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AttributeWrite>,
) -> ApiResult<web::Json<AttributeResponse>> {
    let renamed =
        rename_core::<Ingredient>(&identity, &state, path.into_inner(), payload.into_inner())
            .await?;
    Ok(web::Json(renamed))
}

/// Delete one of the caller's ingredients.
#[utoipa::path(
    delete,
    path = "/api/v1/ingredients/{id}",
    params(("id" = i64, Path, description = "Ingredient id")),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["ingredients"],
    operation_id = "deleteIngredient"
)]
#[delete("/ingredients/{id}")]
pub async fn remove(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove_core::<Ingredient>(&identity, &state, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
