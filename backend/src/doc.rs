//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API: every
//! endpoint from the inbound layer, the request and response schemas, and
//! the bearer token security scheme. Swagger UI serves the document in
//! debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::attributes::{AttributeResponse, AttributeWrite};
use crate::inbound::http::recipes::{RecipeDetail, RecipeSummary, RecipeWrite};
use crate::inbound::http::users::{RegisterRequest, TokenRequest, TokenResponse, UserResponse};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token issued by POST /api/v1/users/token."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe service API",
        description = "Token-authenticated access to per-user recipes, tags, and ingredients."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::create_token,
        crate::inbound::http::users::current_user,
        crate::inbound::http::recipes::list,
        crate::inbound::http::recipes::create,
        crate::inbound::http::recipes::retrieve,
        crate::inbound::http::recipes::replace,
        crate::inbound::http::recipes::update,
        crate::inbound::http::recipes::remove,
        crate::inbound::http::tags::list,
        crate::inbound::http::tags::replace,
        crate::inbound::http::tags::update,
        crate::inbound::http::tags::remove,
        crate::inbound::http::ingredients::list,
        crate::inbound::http::ingredients::replace,
        crate::inbound::http::ingredients::update,
        crate::inbound::http::ingredients::remove,
    ),
    components(schemas(
        Error,
        ErrorCode,
        RegisterRequest,
        TokenRequest,
        TokenResponse,
        UserResponse,
        RecipeSummary,
        RecipeDetail,
        RecipeWrite,
        AttributeResponse,
        AttributeWrite,
    )),
    tags(
        (name = "users", description = "Account registration and token auth"),
        (name = "recipes", description = "Per-user recipe management"),
        (name = "tags", description = "Per-user recipe tags"),
        (name = "ingredients", description = "Per-user recipe ingredients")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/users",
            "/api/v1/users/token",
            "/api/v1/users/me",
            "/api/v1/recipes",
            "/api/v1/recipes/{id}",
            "/api/v1/tags",
            "/api/v1/tags/{id}",
            "/api/v1/ingredients",
            "/api/v1/ingredients/{id}",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing path '{path}' in the OpenAPI document"
            );
        }
    }

    #[test]
    fn openapi_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("Error"));
        assert!(schemas.contains_key("RecipeDetail"));
    }
}
