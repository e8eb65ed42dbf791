//! Tag API handlers.
//!
//! ```text
//! GET /api/v1/tags
//! PUT /api/v1/tags/{id} {"name":"Vegan"}
//! PATCH /api/v1/tags/{id} {"name":"Vegan"}
//! DELETE /api/v1/tags/{id}
//! ```
//!
//! Tags are created implicitly alongside recipes, so the surface here is
//! list, rename, and delete. The behaviour lives in
//! [`attributes`](super::attributes); these handlers bind it to routes.

use actix_web::{HttpResponse, delete, get, patch, put, web};

use crate::domain::{Error, Tag};
use crate::inbound::http::ApiResult;
use crate::inbound::http::attributes::{
    AttributeResponse, AttributeWrite, list_core, remove_core, rename_core,
};
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// List the caller's tags, reverse-alphabetical.
#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "The caller's tags", body = [AttributeResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list(
    identity: Identity,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AttributeResponse>>> {
    Ok(web::Json(list_core::<Tag>(&identity, &state).await?))
}

/// Rename one of the caller's tags.
#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = AttributeWrite,
    responses(
        (status = 200, description = "Renamed tag", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "replaceTag"
)]
#[put("/tags/{id}")]
pub async fn replace(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AttributeWrite>,
) -> ApiResult<web::Json<AttributeResponse>> {
    let renamed =
        rename_core::<Tag>(&identity, &state, path.into_inner(), payload.into_inner()).await?;
    Ok(web::Json(renamed))
}

/// Rename one of the caller's tags (partial update form).
#[utoipa::path(
    patch,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = AttributeWrite,
    responses(
        (status = 200, description = "Renamed tag", body = AttributeResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "updateTag"
)]
#[patch("/tags/{id}")]
pub async fn update(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<AttributeWrite>,
) -> ApiResult<web::Json<AttributeResponse>> {
    let renamed =
        rename_core::<Tag>(&identity, &state, path.into_inner(), payload.into_inner()).await?;
    Ok(web::Json(renamed))
}

/// Delete one of the caller's tags.
#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "deleteTag"
)]
#[delete("/tags/{id}")]
pub async fn remove(
    identity: Identity,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    remove_core::<Tag>(&identity, &state, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::{Method, StatusCode};
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::domain::UserId;
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{
        authed, authed_get, fixture_user_id, register_and_login, test_app,
    };

    async fn seed_tag(state: &HttpState, owner: UserId, name: &str) -> i64 {
        state
            .tags
            .insert(owner, name.to_owned())
            .await
            .expect("seed tag")
            .id
            .get()
    }

    #[rstest]
    #[actix_web::test]
    async fn list_is_scoped_and_reverse_alphabetical() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let token = register_and_login(&app, "tags@example.com").await;
        let other = register_and_login(&app, "other@example.com").await;

        let me = fixture_user_id(&app, &token).await;
        let them = fixture_user_id(&app, &other).await;
        seed_tag(&state, me, "Breakfast").await;
        seed_tag(&state, me, "Vegan").await;
        // Same name for another user must not bleed into the caller's list.
        seed_tag(&state, them, "Vegan").await;
        seed_tag(&state, them, "Dessert").await;

        let resp = actix_test::call_service(&app, authed_get("/api/v1/tags", &token)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        let names: Vec<&str> = body
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|item| item.get("name").and_then(Value::as_str))
            .collect();
        assert_eq!(names, vec!["Vegan", "Breakfast"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn rename_updates_the_name() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let token = register_and_login(&app, "tags@example.com").await;
        let me = fixture_user_id(&app, &token).await;
        let id = seed_tag(&state, me, "Before").await;

        let req = authed(Method::PATCH, &format!("/api/v1/tags/{id}"), &token)
            .set_json(json!({ "name": "After" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body.get("name").and_then(Value::as_str), Some("After"));

        // The rename is persisted, not just echoed.
        let resp = actix_test::call_service(&app, authed_get("/api/v1/tags", &token)).await;
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(
            body.pointer("/0/name").and_then(Value::as_str),
            Some("After")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn rename_rejects_a_blank_name() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let token = register_and_login(&app, "tags@example.com").await;
        let me = fixture_user_id(&app, &token).await;
        let id = seed_tag(&state, me, "Kept").await;

        let req = authed(Method::PUT, &format!("/api/v1/tags/{id}"), &token)
            .set_json(json!({ "name": "   " }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn foreign_tags_answer_not_found() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let owner = register_and_login(&app, "owner@example.com").await;
        let intruder = register_and_login(&app, "intruder@example.com").await;
        let owner_id = fixture_user_id(&app, &owner).await;
        let id = seed_tag(&state, owner_id, "Private").await;

        let uri = format!("/api/v1/tags/{id}");
        let req = authed(Method::PATCH, &uri, &intruder)
            .set_json(json!({ "name": "Hijacked" }))
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
        let req = authed(Method::DELETE, &uri, &intruder).to_request();
        assert_eq!(
            actix_test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_answers_no_content_then_not_found() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state.clone())).await;
        let token = register_and_login(&app, "tags@example.com").await;
        let me = fixture_user_id(&app, &token).await;
        let id = seed_tag(&state, me, "Doomed").await;

        let uri = format!("/api/v1/tags/{id}");
        let resp =
            actix_test::call_service(&app, authed(Method::DELETE, &uri, &token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let resp =
            actix_test::call_service(&app, authed(Method::DELETE, &uri, &token).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = actix_test::call_service(&app, authed_get("/api/v1/tags", &token)).await;
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body.as_array().map(Vec::len), Some(0));
    }

    #[rstest]
    #[actix_web::test]
    async fn listing_requires_authentication() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/tags")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
