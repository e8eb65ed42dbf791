//! Shared helpers for HTTP handler tests.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use super::state::HttpState;

/// Standard password used by test fixtures.
pub(crate) const TEST_PASSWORD: &str = "testpass123";

/// Build an application mirroring the production route layout.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(super::configure))
}

/// A request builder carrying the bearer token.
pub(crate) fn authed(method: Method, uri: &str, token: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header((header::AUTHORIZATION, format!("Token {token}")))
}

pub(crate) fn authed_get(uri: &str, token: &str) -> Request {
    authed(Method::GET, uri, token).to_request()
}

/// Resolve the id behind a bearer token via `GET /users/me`.
pub(crate) async fn fixture_user_id<S, B>(app: &S, token: &str) -> crate::domain::UserId
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let resp = actix_test::call_service(app, authed_get("/api/v1/users/me", token)).await;
    assert!(resp.status().is_success(), "fixture identity lookup failed");
    let body: Value = actix_test::read_body_json(resp).await;
    let id = body
        .get("id")
        .and_then(Value::as_i64)
        .expect("user id in response");
    crate::domain::UserId::new(id)
}

/// Register an account and exchange its credentials for a bearer token.
pub(crate) async fn register_and_login<S, B>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let register = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let created = actix_test::call_service(app, register).await;
    assert!(
        created.status().is_success(),
        "fixture registration failed: {}",
        created.status()
    );

    let login = actix_test::TestRequest::post()
        .uri("/api/v1/users/token")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let resp = actix_test::call_service(app, login).await;
    assert!(
        resp.status().is_success(),
        "fixture login failed: {}",
        resp.status()
    );
    let body: Value = actix_test::read_body_json(resp).await;
    body.get("token")
        .and_then(Value::as_str)
        .expect("token in login response")
        .to_owned()
}
