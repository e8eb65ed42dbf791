//! User account API handlers.
//!
//! ```text
//! POST /api/v1/users {"email":"user@example.com","password":"secret"}
//! POST /api/v1/users/token {"email":"user@example.com","password":"secret"}
//! GET /api/v1/users/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Identity;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /api/v1/users`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
    pub password: String,
}

/// Token request body for `POST /api/v1/users/token`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[schema(example = "user@example.com")]
    pub email: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}

/// Public view of an account. The password hash never leaves the domain.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    #[schema(example = "user@example.com")]
    pub email: String,
    pub is_active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            email: user.email.to_string(),
            is_active: user.is_active,
        }
    }
}

impl TryFrom<TokenRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: TokenRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let user = state
        .accounts
        .create_user(&payload.email, &payload.password)
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/users/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createToken",
    security([])
)]
#[post("/users/token")]
pub async fn create_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let token = state.accounts.login(credentials).await?;
    Ok(web::Json(TokenResponse {
        token: token.expose().to_owned(),
    }))
}

/// Fetch the authenticated account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "The caller's account", body = UserResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(identity: Identity) -> ApiResult<web::Json<UserResponse>> {
    Ok(web::Json(UserResponse::from(identity.user())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{authed_get, register_and_login, test_app};

    #[rstest]
    #[actix_web::test]
    async fn register_returns_created_with_public_fields() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "Test@EXAMPLE.com", "password": "testpass123" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(
            body.get("email").and_then(Value::as_str),
            Some("Test@example.com")
        );
        assert_eq!(body.get("isActive").and_then(Value::as_bool), Some(true));
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn register_rejects_blank_email() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "   ", "password": "testpass123" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(
            body.pointer("/details/field").and_then(Value::as_str),
            Some("email")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn register_rejects_duplicate_email() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;
        let payload = json!({ "email": "dup@example.com", "password": "testpass123" });

        let first = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload.clone())
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, first).await.status(),
            StatusCode::CREATED
        );

        let second = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(payload)
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, second).await.status(),
            StatusCode::CONFLICT
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn token_endpoint_issues_token_for_valid_credentials() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let register_req = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "login@example.com", "password": "testpass123" }))
            .to_request();
        actix_test::call_service(&app, register_req).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/users/token")
            .set_json(json!({ "email": "login@example.com", "password": "testpass123" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        let token = body
            .get("token")
            .and_then(Value::as_str)
            .expect("token present");
        assert!(!token.is_empty());
    }

    #[rstest]
    #[case(json!({ "email": "login@example.com", "password": "wrong" }))]
    #[case(json!({ "email": "nobody@example.com", "password": "testpass123" }))]
    #[actix_web::test]
    async fn token_endpoint_rejects_bad_credentials(#[case] attempt: Value) {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let register_req = actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "email": "login@example.com", "password": "testpass123" }))
            .to_request();
        actix_test::call_service(&app, register_req).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/users/token")
            .set_json(attempt)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = actix_test::read_body_json(resp).await;
        assert!(body.get("token").is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn me_returns_the_authenticated_account() {
        let state = HttpState::in_memory();
        let app = actix_test::init_service(test_app(state)).await;
        let token = register_and_login(&app, "me@example.com").await;

        let resp = actix_test::call_service(&app, authed_get("/api/v1/users/me", &token)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(
            body.get("email").and_then(Value::as_str),
            Some("me@example.com")
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn me_requires_authentication() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn me_rejects_an_unknown_token() {
        let app = actix_test::init_service(test_app(HttpState::in_memory())).await;

        let resp =
            actix_test::call_service(&app, authed_get("/api/v1/users/me", "not-a-real-token"))
                .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
