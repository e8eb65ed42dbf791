//! Bearer-token authentication for the HTTP adapter.
//!
//! [`Identity`] is an extractor: handlers that take one are authenticated, and
//! handlers that do not never see a user. Token resolution goes through the
//! [`AuthGate`] driving port, so the extractor holds no auth logic beyond
//! header parsing.
//!
//! [`AuthGate`]: crate::domain::ports::AuthGate

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures_util::future::LocalBoxFuture;

use super::state::HttpState;
use crate::domain::{AccessToken, Error, User, UserId};

/// The authenticated caller for one request.
#[derive(Debug, Clone)]
pub struct Identity {
    user: User,
}

impl Identity {
    /// The resolved account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The caller's id, the scope for every owned-resource query.
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts both `Token <key>` and `Bearer <key>` schemes.
fn parse_bearer(header_value: &str) -> Option<AccessToken> {
    let raw = header_value
        .strip_prefix("Token ")
        .or_else(|| header_value.strip_prefix("Bearer "))?
        .trim();
    if raw.is_empty() {
        return None;
    }
    Some(AccessToken::new(raw))
}

fn token_from_request(req: &HttpRequest) -> Result<AccessToken, Error> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication required"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    parse_bearer(value).ok_or_else(|| Error::unauthorized("malformed authorization header"))
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = token_from_request(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("application state missing"))?;
            let user = state
                .auth
                .resolve(&token?)
                .await?
                .ok_or_else(|| Error::unauthorized("invalid token"))?;
            Ok(Self { user })
        })
    }
}
