//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
    #[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] code: ErrorCode, #[case] expected: StatusCode) {
        assert_eq!(Error::new(code, "x").status_code(), expected);
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let response = Error::internal("database password is hunter2").error_response();
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("read body");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(
            value.get("message").and_then(|v| v.as_str()),
            Some("Internal server error")
        );
    }

    #[rstest]
    fn non_internal_messages_pass_through() {
        let err = Error::not_found("recipe not found");
        assert_eq!(redact_if_internal(&err).message(), "recipe not found");
    }
}
