//! Shared core for the tag and ingredient endpoints.
//!
//! Tags and ingredients expose the same surface: list, rename, delete. The
//! behaviour lives here once, generic over [`AttributeResource`]; the
//! `tags` and `ingredients` modules add the route attributes and OpenAPI
//! annotations, which cannot sit on generic functions.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::AttributeRepository;
use crate::domain::{AttributeId, Error, Ingredient, RecipeAttribute, Tag};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// Ties an attribute type to its repository slot in [`HttpState`].
pub trait AttributeResource: RecipeAttribute {
    /// The repository serving this attribute type.
    fn repository(state: &HttpState) -> &Arc<dyn AttributeRepository<Self>>;
}

impl AttributeResource for Tag {
    fn repository(state: &HttpState) -> &Arc<dyn AttributeRepository<Self>> {
        &state.tags
    }
}

impl AttributeResource for Ingredient {
    fn repository(state: &HttpState) -> &Arc<dyn AttributeRepository<Self>> {
        &state.ingredients
    }
}

/// Public view of a tag or ingredient.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeResponse {
    pub id: i64,
    #[schema(example = "Vegan")]
    pub name: String,
}

impl AttributeResponse {
    fn of<A: RecipeAttribute>(attribute: &A) -> Self {
        Self {
            id: attribute.id().get(),
            name: attribute.name().to_owned(),
        }
    }
}

/// Write payload for renaming a tag or ingredient.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeWrite {
    #[schema(example = "Vegan")]
    pub name: String,
}

impl AttributeWrite {
    fn validated_name(self) -> Result<String, Error> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(Error::invalid_request("name must not be empty")
                .with_details(json!({ "field": "name", "code": "empty_name" })));
        }
        Ok(name)
    }
}

fn attribute_not_found<A: RecipeAttribute>() -> Error {
    Error::not_found(format!("{} not found", A::RESOURCE))
}

pub(super) async fn list_core<A: AttributeResource>(
    identity: &Identity,
    state: &HttpState,
) -> ApiResult<Vec<AttributeResponse>> {
    let attributes = A::repository(state)
        .list_for_owner(identity.user_id())
        .await?;
    Ok(attributes.iter().map(AttributeResponse::of).collect())
}

pub(super) async fn rename_core<A: AttributeResource>(
    identity: &Identity,
    state: &HttpState,
    id: i64,
    payload: AttributeWrite,
) -> ApiResult<AttributeResponse> {
    let name = payload.validated_name()?;
    let attribute = A::repository(state)
        .rename_for_owner(identity.user_id(), AttributeId::new(id), name)
        .await?
        .ok_or_else(attribute_not_found::<A>)?;
    Ok(AttributeResponse::of(&attribute))
}

pub(super) async fn remove_core<A: AttributeResource>(
    identity: &Identity,
    state: &HttpState,
    id: i64,
) -> ApiResult<()> {
    let deleted = A::repository(state)
        .delete_for_owner(identity.user_id(), AttributeId::new(id))
        .await?;
    if deleted {
        Ok(())
    } else {
        Err(attribute_not_found::<A>())
    }
}
