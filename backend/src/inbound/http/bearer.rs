//! Bearer token extractor for protected handlers.
//!
//! Reads `Authorization: Bearer <token>` and verifies it through the
//! [`TokenVerifier`](crate::domain::ports::TokenVerifier) held in
//! [`HttpState`]. Handlers that take an [`AuthenticatedUser`] never run for
//! unauthenticated requests.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::ports::TokenError;
use crate::domain::{Error, TokenClaims, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(TokenClaims);

impl AuthenticatedUser {
    /// Subject of the token.
    pub fn user_id(&self) -> &UserId {
        &self.0.user_id
    }

    /// Full verified claim set.
    pub fn claims(&self) -> &TokenClaims {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("bearer extractor used without HttpState");
        return Err(Error::internal("http state is not configured"));
    };
    let token = bearer_token(req)?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err {
                TokenError::Expired => Error::unauthorized("token has expired"),
                _ => Error::unauthorized("invalid bearer token"),
            }
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
