//! Recipe API handlers.
//!
//! ```text
//! GET /api/v1/recipes
//! POST /api/v1/recipes {"title":"Pad Thai","timeMinutes":25,"price":"9.50"}
//! GET /api/v1/recipes/{id}
//! PUT /api/v1/recipes/{id}
//! PATCH /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Every handler takes an [`Identity`] and every repository call is scoped to
//! that caller, so another user's recipe is indistinguishable from a missing
//! one and answers 404.

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Recipe, RecipeChanges, RecipeDraft, RecipeId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// Compact listing view: no description.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    #[schema(example = "Pad Thai")]
    pub title: String,
    pub time_minutes: u32,
    /// Decimal price rendered as a string to avoid float rounding.
    #[schema(example = "9.50")]
    pub price: String,
    pub link: Option<String>,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.get(),
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price.to_string(),
            link: recipe.link.clone(),
        }
    }
}

/// Full view returned by create, retrieve, and update.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: u32,
    #[schema(example = "9.50")]
    pub price: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl From<&Recipe> for RecipeDetail {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.get(),
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price.to_string(),
            description: recipe.description.clone(),
            link: recipe.link.clone(),
        }
    }
}

/// Write payload shared by create and both update flavours. Create and full
/// replace require `title`, `timeMinutes`, and `price`; partial update treats
/// every field as optional.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeWrite {
    pub title: Option<String>,
    pub time_minutes: Option<u32>,
    #[schema(example = "9.50")]
    pub price: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

fn missing_field(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required"))
        .with_details(json!({ "field": field, "code": "required" }))
}

fn parse_price(raw: &str) -> Result<BigDecimal, Error> {
    BigDecimal::from_str(raw.trim()).map_err(|_| {
        Error::invalid_request("price must be a decimal number")
            .with_details(json!({ "field": "price", "code": "invalid_decimal" }))
    })
}

impl RecipeWrite {
    /// All required fields present: the shape for create and full replace.
    fn into_draft(self) -> Result<RecipeDraft, Error> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| missing_field("title"))?;
        let time_minutes = self.time_minutes.ok_or_else(|| missing_field("timeMinutes"))?;
        let price = parse_price(&self.price.ok_or_else(|| missing_field("price"))?)?;
        Ok(RecipeDraft {
            title,
            time_minutes,
            price,
            description: self.description,
            link: self.link,
        })
    }

    /// Whatever fields were sent: the shape for partial update.
    fn into_changes(self) -> Result<RecipeChanges, Error> {
        let price = self.price.as_deref().map(parse_price).transpose()?;
        Ok(RecipeChanges {
            title: self.title,
            time_minutes: self.time_minutes,
            price,
            description: self.description,
            link: self.link,
        })
    }
}

fn recipe_not_found() -> Error {
    Error::not_found("recipe not found")
}

/// List the caller's recipes, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "The caller's recipes", body = [RecipeSummary]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecipeSummary>>> {
    let recipes = state.recipes.list_for_owner(identity.user_id()).await?;
    Ok(web::Json(recipes.iter().map(RecipeSummary::from).collect()))
}

/// Create a recipe owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = RecipeWrite,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDetail),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create(
    identity: Identity,
    state: web::Data<HttpState>,
    payload: web::Json<RecipeWrite>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let recipe = state.recipes.insert(identity.user_id(), draft).await?;
    Ok(HttpResponse::Created().json(RecipeDetail::from(&recipe)))
}

/// Fetch one of the caller's recipes.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "The recipe", body = RecipeDetail),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn retrieve(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RecipeDetail>> {
    let id = RecipeId::new(path.into_inner());
    let recipe = state
        .recipes
        .find_for_owner(identity.user_id(), id)
        .await?
        .ok_or_else(recipe_not_found)?;
    Ok(web::Json(RecipeDetail::from(&recipe)))
}

/// Replace one of the caller's recipes.
#[utoipa::path(
    put,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeWrite,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetail),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "replaceRecipe"
)]
#[put("/recipes/{id}")]
pub async fn replace(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<RecipeWrite>,
) -> ApiResult<web::Json<RecipeDetail>> {
    let id = RecipeId::new(path.into_inner());
    let changes = RecipeChanges::from(payload.into_inner().into_draft()?);
    let recipe = state
        .recipes
        .update_for_owner(identity.user_id(), id, changes)
        .await?
        .ok_or_else(recipe_not_found)?;
    Ok(web::Json(RecipeDetail::from(&recipe)))
}

/// Update some fields of one of the caller's recipes.
#[utoipa::path(
    patch,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    request_body = RecipeWrite,
    responses(
        (status = 200, description = "Updated recipe", body = RecipeDetail),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "updateRecipe"
)]
#[patch("/recipes/{id}")]
pub async fn update(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<RecipeWrite>,
) -> ApiResult<web::Json<RecipeDetail>> {
    let id = RecipeId::new(path.into_inner());
    let changes = payload.into_inner().into_changes()?;

    // An empty change set is a read; Diesel rejects updates with no columns.
    let recipe = if changes.is_empty() {
        state.recipes.find_for_owner(identity.user_id(), id).await?
    } else {
        state
            .recipes
            .update_for_owner(identity.user_id(), id, changes)
            .await?
    };
    let recipe = recipe.ok_or_else(recipe_not_found)?;
    Ok(web::Json(RecipeDetail::from(&recipe)))
}

/// Delete one of the caller's recipes.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe id")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn remove(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = RecipeId::new(path.into_inner());
    let deleted = state
        .recipes
        .delete_for_owner(identity.user_id(), id)
        .await?;
    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(recipe_not_found())
    }
}
